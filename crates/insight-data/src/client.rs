//! Codeforces API client.
//!
//! Two endpoints are consumed: `user.status` (submission history) and
//! `user.rating` (rating-change history). Responses arrive wrapped in a
//! `{"status": ..., "result": [...]}` envelope; parsing is kept in pure
//! functions so tests can drive it with JSON fixtures.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use insight_core::error::{InsightError, Result};
use insight_core::models::{Difficulty, RatingChange, Submission, TagSet};
use insight_core::settings::validate_handle;
use insight_core::time_utils::epoch_to_utc;

const DEFAULT_BASE_URL: &str = "https://codeforces.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("cf-insight/", env!("CARGO_PKG_VERSION"));

// ── Configuration ─────────────────────────────────────────────────────────────

/// Connection parameters for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL up to and including `/api` (no trailing slash).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// HTTP client for the Codeforces API.
pub struct CodeforcesClient {
    http: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    /// Build a client from explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InsightError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Build a client with the production endpoint and default timeout.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Fetch the full submission history for `handle`.
    ///
    /// Transport failures and undecodable bodies propagate as errors. A
    /// non-2xx status is absorbed: it is logged and an empty history is
    /// returned, so a missing or renamed user does not abort the run.
    pub async fn fetch_user_status(&self, handle: &str) -> Result<Vec<Submission>> {
        validate_handle(handle)?;
        let url = format!("{}/user.status?handle={}", self.base_url, handle);
        debug!(handle = %handle, url = %url, "fetching submission history");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "user.status for {} returned HTTP {}; treating history as empty",
                handle, status
            );
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let submissions = parse_status_response(&body)?;
        debug!(
            handle = %handle,
            count = submissions.len(),
            "submission history fetched"
        );
        Ok(submissions)
    }

    /// Fetch the rating-change history for `handle`.
    ///
    /// Never fails: any error (network, status, decode, API failure) is
    /// logged and an empty history is returned.
    pub async fn fetch_user_rating(&self, handle: &str) -> Vec<RatingChange> {
        match self.try_fetch_user_rating(handle).await {
            Ok(events) => events,
            Err(e) => {
                warn!("rating history for {} unavailable: {}", handle, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_user_rating(&self, handle: &str) -> Result<Vec<RatingChange>> {
        validate_handle(handle)?;
        let url = format!("{}/user.rating?handle={}", self.base_url, handle);
        debug!(handle = %handle, url = %url, "fetching rating history");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::Api(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        parse_rating_response(&body)
    }
}

// ── Wire format ───────────────────────────────────────────────────────────────

/// The `{"status": ..., "result": [...], "comment": ...}` wrapper every
/// API response uses.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    result: Option<Vec<T>>,
    #[serde(default)]
    comment: Option<String>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<Vec<T>> {
        self.result.ok_or_else(|| {
            InsightError::Api(
                self.comment
                    .unwrap_or_else(|| format!("status {}", self.status)),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmission {
    id: u64,
    creation_time_seconds: i64,
    problem: RawProblem,
    author: RawAuthor,
    programming_language: String,
    verdict: String,
    time_consumed_millis: u64,
    memory_consumed_bytes: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProblem {
    contest_id: i64,
    index: String,
    name: String,
    #[serde(default)]
    rating: Option<u32>,
    #[serde(default)]
    tags: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuthor {
    participant_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRatingChange {
    contest_id: i64,
    contest_name: String,
    rank: u32,
    old_rating: i32,
    new_rating: i32,
    rating_update_time_seconds: i64,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Decode a `user.status` response body into submission records.
///
/// Missing difficulty becomes [`Difficulty::Unrated`], missing tags become
/// an empty tag set; malformed tag payloads are carried as
/// [`TagSet::Malformed`] for the pipeline to report.
pub fn parse_status_response(body: &str) -> Result<Vec<Submission>> {
    let envelope: Envelope<RawSubmission> = serde_json::from_str(body)?;
    envelope
        .into_result()?
        .into_iter()
        .map(map_submission)
        .collect()
}

/// Decode a `user.rating` response body into rating events, in API order.
pub fn parse_rating_response(body: &str) -> Result<Vec<RatingChange>> {
    let envelope: Envelope<RawRatingChange> = serde_json::from_str(body)?;
    envelope
        .into_result()?
        .into_iter()
        .map(map_rating_change)
        .collect()
}

fn map_submission(raw: RawSubmission) -> Result<Submission> {
    let submitted_at = epoch_to_utc(raw.creation_time_seconds)
        .ok_or(InsightError::Timestamp(raw.creation_time_seconds))?;

    Ok(Submission {
        id: raw.id,
        submitted_at,
        contest_id: raw.problem.contest_id,
        problem_index: raw.problem.index,
        problem_name: raw.problem.name,
        difficulty: raw
            .problem
            .rating
            .map(Difficulty::Rated)
            .unwrap_or(Difficulty::Unrated),
        tags: TagSet::from_value(raw.problem.tags.as_ref()),
        participant_type: raw.author.participant_type,
        language: raw.programming_language,
        verdict: raw.verdict,
        time_ms: raw.time_consumed_millis,
        memory_kb: raw.memory_consumed_bytes as f64 / 1024.0,
    })
}

fn map_rating_change(raw: RawRatingChange) -> Result<RatingChange> {
    let updated_at = epoch_to_utc(raw.rating_update_time_seconds)
        .ok_or(InsightError::Timestamp(raw.rating_update_time_seconds))?;

    Ok(RatingChange {
        contest_id: raw.contest_id,
        contest_name: raw.contest_name,
        rank: raw.rank,
        old_rating: raw.old_rating,
        new_rating: raw.new_rating,
        updated_at,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
