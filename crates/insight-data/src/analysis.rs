//! Top-level analysis pipeline.
//!
//! Orchestrates the two fetches and the cleaning pass, returning an
//! [`AnalysisResult`] ready for the report printer and the dashboard.

use chrono::Utc;
use tracing::{info, warn};

use insight_core::error::Result;
use insight_core::models::RatingChange;

use crate::client::CodeforcesClient;
use crate::table::{CleanReport, SubmissionTable};
use crate::tags::TagFrequencies;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// Handle that was analyzed.
    pub handle: String,
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of submissions returned by the API.
    pub submissions_fetched: usize,
    /// Row count after cleaning.
    pub rows_after_clean: usize,
    /// Number of rating events returned by the API.
    pub rating_events: usize,
    /// Wall-clock seconds spent on the two fetches.
    pub fetch_time_seconds: f64,
    /// Wall-clock seconds spent cleaning the table.
    pub clean_time_seconds: f64,
}

/// The complete output of [`analyze_handle`].
pub struct AnalysisResult {
    /// The cleaned working table.
    pub table: SubmissionTable,
    /// Tag occurrence counts across all rows.
    pub tag_frequencies: TagFrequencies,
    /// What the cleaning pass did.
    pub report: CleanReport,
    /// Rating-change history, in API (chronological) order. Empty when the
    /// rating fetch failed.
    pub rating_history: Vec<RatingChange>,
    /// Metadata about this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis for one handle.
///
/// 1. Fetch the submission history (transport errors propagate).
/// 2. Materialize and clean the working table.
/// 3. Fetch the rating history (failures degrade to an empty history).
/// 4. Return the result with run metadata.
pub async fn analyze_handle(client: &CodeforcesClient, handle: &str) -> Result<AnalysisResult> {
    // ── Step 1: Submissions ───────────────────────────────────────────────────
    let fetch_start = std::time::Instant::now();
    let submissions = client.fetch_user_status(handle).await?;
    let submissions_fetched = submissions.len();
    info!("{}: fetched {} submissions", handle, submissions_fetched);

    // ── Step 2: Clean ─────────────────────────────────────────────────────────
    let clean_start = std::time::Instant::now();
    let mut table = SubmissionTable::from_submissions(submissions);
    let (report, tag_frequencies) = table.clean()?;
    let clean_time = clean_start.elapsed().as_secs_f64();

    if !report.malformed_tag_submissions.is_empty() {
        warn!(
            "{} submission(s) carried unparseable tag data: {:?}",
            report.malformed_tag_submissions.len(),
            report.malformed_tag_submissions
        );
    }

    // ── Step 3: Rating history ────────────────────────────────────────────────
    let rating_history = client.fetch_user_rating(handle).await;
    let fetch_time = fetch_start.elapsed().as_secs_f64() - clean_time;
    info!("{}: fetched {} rating events", handle, rating_history.len());

    // ── Step 4: Result ────────────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        handle: handle.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        submissions_fetched,
        rows_after_clean: report.rows_out,
        rating_events: rating_history.len(),
        fetch_time_seconds: fetch_time,
        clean_time_seconds: clean_time,
    };

    Ok(AnalysisResult {
        table,
        tag_frequencies,
        report,
        rating_history,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use insight_core::error::InsightError;
    use std::time::Duration;

    fn unreachable_client() -> CodeforcesClient {
        CodeforcesClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout: Duration::from_secs(2),
            user_agent: "cf-insight-test".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_handle_propagates_submission_fetch_error() {
        let client = unreachable_client();
        let result = analyze_handle(&client, "tourist").await;
        assert!(matches!(result, Err(InsightError::Network(_))));
    }

    #[tokio::test]
    async fn test_analyze_handle_rejects_invalid_handle() {
        let client = unreachable_client();
        let result = analyze_handle(&client, "??").await;
        assert!(matches!(result, Err(InsightError::InvalidHandle(_))));
    }
}
