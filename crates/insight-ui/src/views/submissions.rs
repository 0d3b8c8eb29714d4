//! Scrollable table of cleaned submission rows.

use chrono_tz::Tz;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use insight_core::time_utils::format_timestamp;
use insight_data::analysis::AnalysisResult;

use crate::themes::Theme;

const NAME_WIDTH: usize = 28;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    result: &AnalysisResult,
    offset: usize,
    timezone: Tz,
    twelve_hour: bool,
    theme: &Theme,
) {
    let rows_data = result.table.rows();
    let visible = area.height.saturating_sub(3) as usize;
    let offset = offset.min(rows_data.len().saturating_sub(1));

    let header = Row::new(
        [
            "Submitted",
            "Problem",
            "Name",
            "Rating",
            "Verdict",
            "Time",
            "Memory",
            "Bands",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = rows_data
        .iter()
        .skip(offset)
        .take(visible)
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let verdict_style = if row.is_accepted() {
                theme.verdict_ok
            } else {
                theme.verdict_fail
            };
            Row::new(vec![
                Cell::from(format_timestamp(row.submitted_at, timezone, twelve_hour)),
                Cell::from(format!("{}{}", row.contest_id, row.problem_index)),
                Cell::from(truncate(&row.problem_name, NAME_WIDTH)),
                Cell::from(row.difficulty.to_string()),
                Cell::from(row.verdict.clone()).style(verdict_style),
                Cell::from(format!("{} ms", row.time_ms)),
                Cell::from(format!("{:.0} KB", row.memory_kb)),
                Cell::from(format!(
                    "{} / {}",
                    row.time_band.map(|b| b.label()).unwrap_or("-"),
                    row.memory_band.map(|b| b.label()).unwrap_or("-"),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(17),
        Constraint::Length(8),
        Constraint::Length(NAME_WIDTH as u16),
        Constraint::Length(8),
        Constraint::Length(22),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(26),
    ];

    let title = format!(
        " Submissions ({}-{} of {}) ",
        offset + 1,
        (offset + visible).min(rows_data.len()),
        rows_data.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Two Buttons", 28), "Two Buttons");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let long = "A Problem With A Very Long Descriptive Name";
        let cut = truncate(long, 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }
}
