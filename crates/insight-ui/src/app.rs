//! Dashboard application state and event loop.
//!
//! [`App`] owns the theme and display preferences and drives the
//! full-screen dashboard. The loop blocks until the user dismisses it with
//! `q` or `Ctrl+C`.

use std::io;
use std::time::Duration;

use chrono_tz::Tz;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use insight_core::time_utils::parse_timezone;
use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;
use crate::views;

// ── View ──────────────────────────────────────────────────────────────────────

/// Which dashboard screen is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Tags,
    Performance,
    Difficulty,
    Verdicts,
    Rating,
    Submissions,
}

impl View {
    /// All views in tab order.
    pub const ALL: [View; 7] = [
        View::Overview,
        View::Tags,
        View::Performance,
        View::Difficulty,
        View::Verdicts,
        View::Rating,
        View::Submissions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Tags => "Tags",
            View::Performance => "Performance",
            View::Difficulty => "Difficulty",
            View::Verdicts => "Verdicts",
            View::Rating => "Rating",
            View::Submissions => "Submissions",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Display timezone for timestamps.
    pub timezone: Tz,
    /// Whether to render 12-hour clock times.
    pub twelve_hour: bool,
    /// How many tags the tag views show.
    pub top_tags: usize,
    view: View,
    scroll: usize,
    should_quit: bool,
}

impl App {
    /// Construct the dashboard with display preferences from settings.
    pub fn new(theme_name: &str, timezone: &str, twelve_hour: bool, top_tags: usize) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            timezone: parse_timezone(timezone),
            twelve_hour,
            top_tags,
            view: View::Overview,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Run the dashboard event loop over a finished analysis result.
    ///
    /// Blocks until the user quits; the terminal is restored
    /// unconditionally on the way out.
    pub async fn run(mut self, result: &AnalysisResult) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let outcome = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, result)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(key.code, key.modifiers, result);
                    }
                }
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        outcome
    }

    // ── Event handling ────────────────────────────────────────────────────────

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, result: &AnalysisResult) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.view = self.view.next();
                self.scroll = 0;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.view = self.view.prev();
                self.scroll = 0;
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = result.table.len().saturating_sub(1);
                self.scroll = (self.scroll + 1).min(max);
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let max = result.table.len().saturating_sub(1);
                self.scroll = (self.scroll + 10).min(max);
            }
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    let idx = digit as usize;
                    if (1..=View::ALL.len()).contains(&idx) {
                        self.view = View::ALL[idx - 1];
                        self.scroll = 0;
                    }
                }
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame, result: &AnalysisResult) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_tab_bar(frame, chunks[0]);

        match self.view {
            View::Overview => {
                views::overview::render(frame, chunks[1], result, &self.theme, self.top_tags)
            }
            View::Tags => {
                views::tags::render(frame, chunks[1], result, &self.theme, self.top_tags)
            }
            View::Performance => {
                views::performance::render(frame, chunks[1], result, &self.theme)
            }
            View::Difficulty => {
                views::difficulty::render(frame, chunks[1], result, &self.theme)
            }
            View::Verdicts => views::verdicts::render(frame, chunks[1], result, &self.theme),
            View::Rating => views::rating::render(
                frame,
                chunks[1],
                &result.rating_history,
                self.timezone,
                self.twelve_hour,
                &self.theme,
            ),
            View::Submissions => views::submissions::render(
                frame,
                chunks[1],
                result,
                self.scroll,
                self.timezone,
                self.twelve_hour,
                &self.theme,
            ),
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            " ←/→ or Tab: switch view · ↑/↓: scroll · q: quit",
            self.theme.dim,
        )));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let titles: Vec<Line> = View::ALL
            .iter()
            .map(|view| Line::from(format!(" {} ", view.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.view.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active);

        frame.render_widget(tabs, area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
