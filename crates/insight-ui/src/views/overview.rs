//! Overview view: summary statistics, top tags, language distribution,
//! success rate, and cleaning notes.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use insight_core::formatting::{format_count, format_float};
use insight_core::stats::{describe, Describe};
use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;

pub fn render(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme, top_tags: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    render_stats_table(frame, chunks[0], result, theme);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_top_tags(frame, lower[0], result, theme, top_tags);
    render_run_notes(frame, lower[1], result, theme);
}

// ── Summary statistics ────────────────────────────────────────────────────────

fn render_stats_table(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let difficulty = describe(&result.table.difficulties());
    let time = describe(&result.table.times_ms());
    let memory = describe(&result.table.memories_kb());

    let header = Row::new(
        ["", "Difficulty", "Time (ms)", "Memory (KB)"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let stat_rows: [(&str, fn(&Describe) -> f64); 8] = [
        ("count", |d| d.count as f64),
        ("mean", |d| d.mean),
        ("std", |d| d.std),
        ("min", |d| d.min),
        ("25%", |d| d.q25),
        ("50%", |d| d.median),
        ("75%", |d| d.q75),
        ("max", |d| d.max),
    ];

    let rows: Vec<Row> = stat_rows
        .iter()
        .enumerate()
        .map(|(i, (name, extract))| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let cell = |d: &Option<Describe>| match d {
                Some(d) => format_float(extract(d), 2),
                None => "-".to_string(),
            };
            Row::new(vec![
                Cell::from(*name).style(theme.label),
                Cell::from(cell(&difficulty)),
                Cell::from(cell(&time)),
                Cell::from(cell(&memory)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Summary Statistics "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Top tags ──────────────────────────────────────────────────────────────────

fn render_top_tags(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme, top_tags: usize) {
    let mut lines: Vec<Line> = Vec::new();
    let ranked = result.tag_frequencies.top(top_tags);

    if ranked.is_empty() {
        lines.push(Line::from(Span::styled("No tag data", theme.dim)));
    } else {
        for (tag, count) in ranked {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24}", tag), theme.label),
                Span::styled(format_count(count), theme.value),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).style(theme.text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Most Common Problem Types "),
    );
    frame.render_widget(paragraph, area);
}

// ── Languages, success rate, cleaning notes ───────────────────────────────────

fn render_run_notes(frame: &mut Frame, area: Rect, result: &AnalysisResult, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Programming Languages",
        theme.bold,
    )));
    for (language, count) in result.table.language_distribution().into_iter().take(5) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", language), theme.label),
            Span::styled(format_count(count), theme.value),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Success rate: ", theme.label),
        Span::styled(
            format!("{}%", format_float(result.table.success_rate(), 2)),
            theme.success,
        ),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Cleaning", theme.bold)));
    lines.push(Line::from(vec![
        Span::styled("Rows fetched / kept: ", theme.label),
        Span::styled(
            format!(
                "{} / {}",
                format_count(result.report.rows_in as u64),
                format_count(result.report.rows_out as u64)
            ),
            theme.value,
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Duplicate solves removed: ", theme.label),
        Span::styled(
            format_count(result.report.duplicates_removed as u64),
            theme.value,
        ),
    ]));
    if let Some(imputed) = result.report.imputed_difficulty {
        lines.push(Line::from(vec![
            Span::styled("Imputed difficulty: ", theme.label),
            Span::styled(
                format!("{} ({} rows)", imputed, result.report.imputed_rows),
                theme.value,
            ),
        ]));
    }
    let malformed = result.report.malformed_tag_submissions.len();
    if malformed > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} submission(s) with unparseable tags", malformed),
            theme.warning,
        )));
    }

    let paragraph = Paragraph::new(lines).style(theme.text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", result.metadata.handle)),
    );
    frame.render_widget(paragraph, area);
}
