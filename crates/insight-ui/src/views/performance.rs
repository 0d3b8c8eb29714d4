//! Performance view: memory and time band distributions plus a
//! time-vs-memory scatter plot.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use insight_core::formatting::format_count;
use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;
use crate::views::make_bars;

pub fn render(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let band_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_band_chart(
        frame,
        band_chunks[0],
        " Memory Consumption ",
        &result.table.memory_band_counts(),
        theme,
    );
    render_band_chart(
        frame,
        band_chunks[1],
        " Time Consumption ",
        &result.table.time_band_counts(),
        theme,
    );
    render_scatter(frame, chunks[1], result, theme);
}

// ── Band distributions ────────────────────────────────────────────────────────

fn render_band_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    counts: &[(&'static str, u64); 4],
    theme: &Theme,
) {
    let items: Vec<(String, u64)> = counts
        .iter()
        .map(|(label, count)| (label.to_string(), *count))
        .collect();
    let bars = make_bars(&items, theme);

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);

    frame.render_widget(chart, area);
}

// ── Time vs memory scatter ────────────────────────────────────────────────────

fn render_scatter(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let points: Vec<(f64, f64)> = result
        .table
        .rows()
        .iter()
        .map(|row| (row.time_ms as f64, row.memory_kb))
        .collect();

    let max_time = points.iter().map(|(t, _)| *t).fold(0.0, f64::max).max(1.0);
    let max_memory = points.iter().map(|(_, m)| *m).fold(0.0, f64::max).max(1.0);

    let dataset = Dataset::default()
        .name("submissions")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(theme.series)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Time vs Memory Consumption "),
        )
        .x_axis(
            Axis::default()
                .title("Time (ms)")
                .style(theme.axis)
                .bounds([0.0, max_time])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_count((max_time / 2.0) as u64)),
                    Span::raw(format_count(max_time as u64)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Memory (KB)")
                .style(theme.axis)
                .bounds([0.0, max_memory])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_count((max_memory / 2.0) as u64)),
                    Span::raw(format_count(max_memory as u64)),
                ]),
        );

    frame.render_widget(chart, area);
}
