//! Difficulty view: problem rating histogram and accepted-by-index bars.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{BarChart, BarGroup, Block, Borders},
    Frame,
};

use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;
use crate::views::make_bars;

pub fn render(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_histogram(frame, chunks[0], result, theme);
    render_by_index(frame, chunks[1], result, theme);
}

fn render_histogram(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let items: Vec<(String, u64)> = result
        .table
        .difficulty_histogram()
        .into_iter()
        .map(|(bucket, count)| (bucket.to_string(), count))
        .collect();
    let bars = make_bars(&items, theme);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Problem Rating Distribution "),
        )
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);

    frame.render_widget(chart, area);
}

fn render_by_index(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let items: Vec<(String, u64)> = result.table.accepted_by_index();
    let bars = make_bars(&items, theme);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Problems Solved by Index "),
        )
        .bar_width(4)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);

    frame.render_widget(chart, area);
}
