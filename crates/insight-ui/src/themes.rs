use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// All UI styles used by the dashboard views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Chrome ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub bar: Style,
    pub bar_value: Style,
    pub axis: Style,
    pub series: Style,
    pub series_alt: Style,
    pub verdict_ok: Style,
    pub verdict_fail: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Cyan),
            bar_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
            axis: Style::default().fg(Color::Gray),
            series: Style::default().fg(Color::Red),
            series_alt: Style::default().fg(Color::Magenta),
            verdict_ok: Style::default().fg(Color::Green),
            verdict_fail: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default()
                .fg(Color::White)
                .bg(Color::Blue),
            axis: Style::default().fg(Color::DarkGray),
            series: Style::default().fg(Color::Red),
            series_alt: Style::default().fg(Color::Magenta),
            verdict_ok: Style::default().fg(Color::Green),
            verdict_fail: Style::default().fg(Color::Red),
        }
    }

    /// High-contrast classic theme for terminals without good color support.
    pub fn classic() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            tab_active: Style::default().add_modifier(Modifier::REVERSED),
            tab_inactive: Style::default(),

            text: Style::default(),
            dim: Style::default().add_modifier(Modifier::DIM),
            bold: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),
            value: Style::default().add_modifier(Modifier::BOLD),

            success: Style::default().add_modifier(Modifier::BOLD),
            warning: Style::default().add_modifier(Modifier::UNDERLINED),
            error: Style::default().add_modifier(Modifier::REVERSED),

            table_header: Style::default().add_modifier(Modifier::BOLD),
            table_row: Style::default(),
            table_row_alt: Style::default().add_modifier(Modifier::DIM),
            table_total: Style::default().add_modifier(Modifier::BOLD),

            bar: Style::default(),
            bar_value: Style::default().add_modifier(Modifier::REVERSED),
            axis: Style::default(),
            series: Style::default().add_modifier(Modifier::BOLD),
            series_alt: Style::default(),
            verdict_ok: Style::default().add_modifier(Modifier::BOLD),
            verdict_fail: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Resolve a theme name from settings: `"light"`, `"dark"`, `"classic"`,
    /// or `"auto"` (background detection).
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                BackgroundType::Dark => Self::dark(),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_explicit() {
        let light = Theme::from_name("light");
        assert_eq!(light.text.fg, Some(Color::Black));

        let dark = Theme::from_name("dark");
        assert_eq!(dark.text.fg, Some(Color::White));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        // Unknown names resolve via background detection and must not panic.
        let _ = Theme::from_name("plasma");
    }

    #[test]
    fn test_classic_has_no_colors() {
        let classic = Theme::classic();
        assert_eq!(classic.text.fg, None);
        assert_eq!(classic.bar.fg, None);
    }
}
