//! Tag-frequency bar chart.

use ratatui::{
    layout::{Direction, Rect},
    text::{Line, Span},
    widgets::{BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;
use crate::views::make_bars;

pub fn render(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme, top_tags: usize) {
    let ranked = result.tag_frequencies.top(top_tags);

    if ranked.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No tag data to chart", theme.dim)),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Frequency of Tags "),
        );
        frame.render_widget(placeholder, area);
        return;
    }

    let bars = make_bars(&ranked, theme);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Frequency of Tags "),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);

    frame.render_widget(chart, area);
}
