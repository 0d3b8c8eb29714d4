//! Dashboard views, one per chart of the analysis report.

pub mod difficulty;
pub mod overview;
pub mod performance;
pub mod rating;
pub mod submissions;
pub mod tags;
pub mod verdicts;

use ratatui::text::Line;
use ratatui::widgets::Bar;

use crate::themes::Theme;

/// Build labelled bars for a [`ratatui::widgets::BarChart`] from
/// `(label, count)` pairs.
pub(crate) fn make_bars<'a>(items: &[(String, u64)], theme: &Theme) -> Vec<Bar<'a>> {
    items
        .iter()
        .map(|(label, count)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value(*count)
                .style(theme.bar)
                .value_style(theme.bar_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_bars_one_per_item() {
        let theme = Theme::dark();
        let items = vec![("dp".to_string(), 3), ("math".to_string(), 1)];
        assert_eq!(make_bars(&items, &theme).len(), 2);
    }
}
