//! Verdict distribution view.

use ratatui::{
    layout::{Direction, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use insight_core::formatting::percentage;
use insight_core::models::ACCEPTED_VERDICT;
use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;

pub fn render(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let distribution = result.table.verdict_distribution();
    let total: u64 = distribution.iter().map(|(_, count)| count).sum();

    let bars: Vec<Bar> = distribution
        .iter()
        .map(|(verdict, count)| {
            let style = if verdict == ACCEPTED_VERDICT {
                theme.verdict_ok
            } else {
                theme.verdict_fail
            };
            let share = percentage(*count as f64, total as f64);
            Bar::default()
                .label(Line::from(display_verdict(verdict)))
                .value(*count)
                .text_value(format!("{} ({:.1}%)", count, share))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Verdict Distribution "),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);

    frame.render_widget(chart, area);
}

/// `OK` reads better spelled out; other verdicts lose their underscores.
fn display_verdict(verdict: &str) -> String {
    if verdict == ACCEPTED_VERDICT {
        "ACCEPTED".to_string()
    } else {
        verdict.replace('_', " ")
    }
}
