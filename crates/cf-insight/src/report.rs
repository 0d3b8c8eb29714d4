//! Plain-text summary report for `--view summary`.

use std::io::Write;

use insight_core::formatting::{format_count, format_float};
use insight_core::stats::describe;
use insight_data::analysis::AnalysisResult;

/// Print the summary report to stdout.
pub fn print_summary(result: &AnalysisResult, top_tags: usize) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    write_summary(&mut stdout.lock(), result, top_tags)
}

/// Write the summary report to any writer.
pub fn write_summary(
    w: &mut impl Write,
    result: &AnalysisResult,
    top_tags: usize,
) -> std::io::Result<()> {
    writeln!(w, "Summary for {}", result.metadata.handle)?;
    writeln!(
        w,
        "{} submissions fetched, {} rows after cleaning ({} duplicate solves removed)",
        format_count(result.metadata.submissions_fetched as u64),
        format_count(result.report.rows_out as u64),
        format_count(result.report.duplicates_removed as u64),
    )?;

    write_describe_section(w, "Difficulty", &result.table.difficulties())?;
    write_describe_section(w, "Time consumption (ms)", &result.table.times_ms())?;
    write_describe_section(w, "Memory consumption (KB)", &result.table.memories_kb())?;

    writeln!(w)?;
    writeln!(w, "Most common problem types:")?;
    let ranked = result.tag_frequencies.top(top_tags);
    if ranked.is_empty() {
        writeln!(w, "  (no tag data)")?;
    }
    for (tag, count) in ranked {
        writeln!(w, "  {}: {}", tag, count)?;
    }

    writeln!(w)?;
    writeln!(w, "Programming language distribution:")?;
    for (language, count) in result.table.language_distribution().into_iter().take(5) {
        writeln!(w, "  {}: {}", language, count)?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "Overall success rate: {}%",
        format_float(result.table.success_rate(), 2)
    )?;

    writeln!(w)?;
    if result.rating_history.is_empty() {
        writeln!(w, "No rating history available")?;
    } else {
        let current = result
            .rating_history
            .last()
            .map(|e| e.new_rating)
            .unwrap_or(0);
        let peak = result
            .rating_history
            .iter()
            .map(|e| e.new_rating)
            .max()
            .unwrap_or(0);
        writeln!(
            w,
            "Rating: {} after {} contests (peak {})",
            current,
            result.rating_history.len(),
            peak
        )?;
    }

    if let Some(imputed) = result.report.imputed_difficulty {
        writeln!(w)?;
        writeln!(
            w,
            "Note: {} unrated problem(s) imputed at difficulty {}",
            result.report.imputed_rows, imputed
        )?;
    }
    let malformed = result.report.malformed_tag_submissions.len();
    if malformed > 0 {
        writeln!(
            w,
            "Note: {} submission(s) carried unparseable tag data",
            malformed
        )?;
    }

    Ok(())
}

fn write_describe_section(w: &mut impl Write, title: &str, values: &[f64]) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{} statistics:", title)?;
    match describe(values) {
        Some(d) => {
            writeln!(w, "  count  {}", d.count)?;
            writeln!(w, "  mean   {}", format_float(d.mean, 2))?;
            writeln!(w, "  std    {}", format_float(d.std, 2))?;
            writeln!(w, "  min    {}", format_float(d.min, 2))?;
            writeln!(w, "  25%    {}", format_float(d.q25, 2))?;
            writeln!(w, "  50%    {}", format_float(d.median, 2))?;
            writeln!(w, "  75%    {}", format_float(d.q75, 2))?;
            writeln!(w, "  max    {}", format_float(d.max, 2))?;
        }
        None => writeln!(w, "  (no data)")?,
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use insight_core::models::{Difficulty, Submission, TagSet};
    use insight_data::analysis::AnalysisMetadata;
    use insight_data::table::SubmissionTable;

    fn make_result() -> AnalysisResult {
        let submissions = vec![
            Submission {
                id: 1,
                submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                contest_id: 10,
                problem_index: "A".to_string(),
                problem_name: "P1".to_string(),
                difficulty: Difficulty::Rated(800),
                tags: TagSet::Tags(vec!["dp".to_string()]),
                participant_type: "PRACTICE".to_string(),
                language: "Rust".to_string(),
                verdict: "OK".to_string(),
                time_ms: 60,
                memory_kb: 40.0,
            },
            Submission {
                id: 2,
                submitted_at: Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap(),
                contest_id: 10,
                problem_index: "B".to_string(),
                problem_name: "P2".to_string(),
                difficulty: Difficulty::Rated(1200),
                tags: TagSet::Tags(vec!["dp".to_string(), "math".to_string()]),
                participant_type: "PRACTICE".to_string(),
                language: "Rust".to_string(),
                verdict: "WRONG_ANSWER".to_string(),
                time_ms: 250,
                memory_kb: 6000.0,
            },
        ];

        let mut table = SubmissionTable::from_submissions(submissions);
        let (report, tag_frequencies) = table.clean().unwrap();
        let rows_out = report.rows_out;

        AnalysisResult {
            table,
            tag_frequencies,
            report,
            rating_history: Vec::new(),
            metadata: AnalysisMetadata {
                handle: "testuser".to_string(),
                generated_at: "2024-03-02T12:00:00Z".to_string(),
                submissions_fetched: 2,
                rows_after_clean: rows_out,
                rating_events: 0,
                fetch_time_seconds: 0.0,
                clean_time_seconds: 0.0,
            },
        }
    }

    #[test]
    fn test_summary_contains_key_sections() {
        let result = make_result();
        let mut out = Vec::new();
        write_summary(&mut out, &result, 10).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Summary for testuser"));
        assert!(text.contains("Difficulty statistics:"));
        assert!(text.contains("Time consumption (ms) statistics:"));
        assert!(text.contains("Memory consumption (KB) statistics:"));
        assert!(text.contains("dp: 2"));
        assert!(text.contains("Rust: 2"));
        assert!(text.contains("Overall success rate: 50.00%"));
        assert!(text.contains("No rating history available"));
    }

    #[test]
    fn test_summary_top_tags_respects_limit() {
        let result = make_result();
        let mut out = Vec::new();
        write_summary(&mut out, &result, 1).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("dp: 2"));
        assert!(!text.contains("math: 1"));
    }
}
