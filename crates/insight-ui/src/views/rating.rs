//! Rating-history view: line chart over time plus contest details.

use chrono_tz::Tz;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use insight_core::models::RatingChange;
use insight_core::time_utils::format_timestamp;

use crate::themes::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    history: &[RatingChange],
    timezone: Tz,
    twelve_hour: bool,
    theme: &Theme,
) {
    if history.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No rating history available", theme.warning)),
            Line::from(""),
            Line::from(Span::styled(
                "The user has no rated contests, or the rating fetch failed.",
                theme.dim,
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rating History "),
        );
        frame.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    render_chart(frame, chunks[0], history, timezone, twelve_hour, theme);
    render_details(frame, chunks[1], history, theme);
}

// ── Line chart ────────────────────────────────────────────────────────────────

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    history: &[RatingChange],
    timezone: Tz,
    twelve_hour: bool,
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = history
        .iter()
        .map(|event| (event.updated_at.timestamp() as f64, event.new_rating as f64))
        .collect();

    let x_min = points.first().map(|(x, _)| *x).unwrap_or(0.0);
    let x_max = points.last().map(|(x, _)| *x).unwrap_or(1.0).max(x_min + 1.0);

    let ratings: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let y_min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Pad the rating axis so the curve is not glued to the borders.
    let y_lo = (y_min - 100.0).max(0.0);
    let y_hi = y_max + 100.0;

    let first = history.first().map(|e| e.updated_at);
    let last = history.last().map(|e| e.updated_at);
    let x_labels: Vec<Span> = [first, last]
        .into_iter()
        .flatten()
        .map(|dt| Span::styled(format_timestamp(dt, timezone, twelve_hour), theme.axis))
        .collect();

    let dataset = Dataset::default()
        .name("rating")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.series)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rating History "),
        )
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Rating")
                .style(theme.axis)
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::styled(format!("{:.0}", y_lo), theme.axis),
                    Span::styled(format!("{:.0}", (y_lo + y_hi) / 2.0), theme.axis),
                    Span::styled(format!("{:.0}", y_hi), theme.axis),
                ]),
        );

    frame.render_widget(chart, area);
}

// ── Details panel ─────────────────────────────────────────────────────────────

fn render_details(frame: &mut Frame, area: Rect, history: &[RatingChange], theme: &Theme) {
    let current = history.last().map(|e| e.new_rating).unwrap_or(0);
    let peak = history.iter().map(|e| e.new_rating).max().unwrap_or(0);
    let best = history.iter().max_by_key(|e| e.delta());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Contests: ", theme.label),
            Span::styled(history.len().to_string(), theme.value),
            Span::styled("   Current rating: ", theme.label),
            Span::styled(current.to_string(), theme.value),
            Span::styled("   Peak: ", theme.label),
            Span::styled(peak.to_string(), theme.value),
        ]),
    ];

    if let Some(best) = best {
        let delta_style = if best.delta() >= 0 {
            theme.success
        } else {
            theme.error
        };
        lines.push(Line::from(vec![
            Span::styled("Best round: ", theme.label),
            Span::styled(best.contest_name.clone(), theme.value),
            Span::styled(format!("  rank {}  ", best.rank), theme.dim),
            Span::styled(format!("{:+}", best.delta()), delta_style),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .style(theme.text)
        .block(Block::default().borders(Borders::ALL).title(" Contests "));
    frame.render_widget(paragraph, area);
}
