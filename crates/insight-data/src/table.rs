//! The working table and its cleaning pipeline.
//!
//! Submissions are materialized into rows with fixed named columns, then
//! cleaned in place: accepted rows are deduplicated, unrated difficulties
//! are imputed from the mean of the rated ones, memory is coerced to whole
//! kibibytes, tag frequencies are accumulated, and every row is assigned a
//! memory band and a time band.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use insight_core::error::{InsightError, Result};
use insight_core::models::{Difficulty, MemoryBand, Submission, TagSet, TimeBand, ACCEPTED_VERDICT};

use crate::tags::TagFrequencies;

// ── TableRow ──────────────────────────────────────────────────────────────────

/// One row of the working table.
///
/// Starts as a copy of a fetched submission; the cleaning pipeline mutates
/// difficulty, memory, and the band columns in place.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub submission_id: u64,
    pub submitted_at: DateTime<Utc>,
    pub contest_id: i64,
    pub problem_index: String,
    pub problem_name: String,
    pub difficulty: Difficulty,
    pub tags: TagSet,
    pub participant_type: String,
    pub language: String,
    pub verdict: String,
    pub time_ms: u64,
    /// Kibibytes; fractional until the coercion step truncates it.
    pub memory_kb: f64,
    /// Set by the banding step.
    pub memory_band: Option<MemoryBand>,
    /// Set by the banding step.
    pub time_band: Option<TimeBand>,
}

impl TableRow {
    fn from_submission(s: Submission) -> Self {
        Self {
            submission_id: s.id,
            submitted_at: s.submitted_at,
            contest_id: s.contest_id,
            problem_index: s.problem_index,
            problem_name: s.problem_name,
            difficulty: s.difficulty,
            tags: s.tags,
            participant_type: s.participant_type,
            language: s.language,
            verdict: s.verdict,
            time_ms: s.time_ms,
            memory_kb: s.memory_kb,
            memory_band: None,
            time_band: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == ACCEPTED_VERDICT
    }

    /// Identity of an accepted solve for deduplication purposes. Uses the
    /// raw, pre-imputation difficulty.
    fn dedup_key(&self) -> (i64, String, String, Difficulty) {
        (
            self.contest_id,
            self.problem_index.clone(),
            self.problem_name.clone(),
            self.difficulty.clone(),
        )
    }
}

// ── CleanReport ───────────────────────────────────────────────────────────────

/// What the cleaning pass did to the table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    /// Row count before cleaning.
    pub rows_in: usize,
    /// Row count after cleaning.
    pub rows_out: usize,
    /// Duplicate accepted rows dropped.
    pub duplicates_removed: usize,
    /// Rows whose difficulty was imputed.
    pub imputed_rows: usize,
    /// The imputed difficulty value, when imputation ran.
    pub imputed_difficulty: Option<u32>,
    /// Submission ids whose tag payload could not be parsed.
    pub malformed_tag_submissions: Vec<u64>,
}

// ── SubmissionTable ───────────────────────────────────────────────────────────

/// The full set of submissions in tabular form.
pub struct SubmissionTable {
    rows: Vec<TableRow>,
}

impl SubmissionTable {
    /// Materialize fetched submissions into rows, preserving fetch order.
    pub fn from_submissions(submissions: Vec<Submission>) -> Self {
        Self {
            rows: submissions
                .into_iter()
                .map(TableRow::from_submission)
                .collect(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Run the whole cleaning pipeline in order, returning the report and
    /// the accumulated tag frequencies.
    ///
    /// An empty table cleans successfully. A table that needs imputation
    /// but has no rated row fails with
    /// [`InsightError::DifficultyMeanUndefined`].
    pub fn clean(&mut self) -> Result<(CleanReport, TagFrequencies)> {
        let rows_in = self.rows.len();

        let duplicates_removed = self.dedup_accepted();
        let (imputed_rows, imputed_difficulty) = self.impute_difficulty()?;
        self.coerce_memory();
        let (frequencies, malformed_tag_submissions) = self.count_tags();
        self.assign_bands();

        let report = CleanReport {
            rows_in,
            rows_out: self.rows.len(),
            duplicates_removed,
            imputed_rows,
            imputed_difficulty,
            malformed_tag_submissions,
        };

        debug!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            duplicates_removed = report.duplicates_removed,
            imputed_rows = report.imputed_rows,
            "table cleaned"
        );

        Ok((report, frequencies))
    }

    // ── Pipeline steps ────────────────────────────────────────────────────────

    /// Deduplicate accepted rows on (contest, index, name, difficulty),
    /// keeping the first occurrence, then re-emit accepted rows followed by
    /// all non-accepted rows. Returns the number of rows dropped.
    fn dedup_accepted(&mut self) -> usize {
        let rows = std::mem::take(&mut self.rows);
        let mut seen: HashSet<(i64, String, String, Difficulty)> = HashSet::new();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        let mut removed = 0usize;

        for row in rows {
            if row.is_accepted() {
                if seen.insert(row.dedup_key()) {
                    accepted.push(row);
                } else {
                    removed += 1;
                }
            } else {
                rejected.push(row);
            }
        }

        accepted.extend(rejected);
        self.rows = accepted;
        removed
    }

    /// Replace unrated difficulties with the mean of the rated ones,
    /// rounded to the nearest hundred.
    ///
    /// The mean is computed once, before any value is written back, so
    /// imputed values never feed the mean.
    fn impute_difficulty(&mut self) -> Result<(usize, Option<u32>)> {
        let unrated = self.rows.iter().filter(|r| !r.difficulty.is_rated()).count();
        if unrated == 0 {
            return Ok((0, None));
        }

        let rated: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|r| r.difficulty.value())
            .map(f64::from)
            .collect();
        if rated.is_empty() {
            return Err(InsightError::DifficultyMeanUndefined);
        }

        let mean = rated.iter().sum::<f64>() / rated.len() as f64;
        let imputed = round_to_hundred(mean);

        for row in &mut self.rows {
            if !row.difficulty.is_rated() {
                row.difficulty = Difficulty::Rated(imputed);
            }
        }

        Ok((unrated, Some(imputed)))
    }

    /// Truncate memory to whole kibibytes.
    fn coerce_memory(&mut self) {
        for row in &mut self.rows {
            row.memory_kb = row.memory_kb.trunc();
        }
    }

    /// Accumulate tag frequencies across all rows. Malformed tag payloads
    /// contribute nothing and are returned by submission id.
    fn count_tags(&self) -> (TagFrequencies, Vec<u64>) {
        let mut frequencies = TagFrequencies::default();
        let mut malformed = Vec::new();

        for row in &self.rows {
            match &row.tags {
                TagSet::Tags(tags) => frequencies.extend(tags),
                TagSet::Malformed(_) => malformed.push(row.submission_id),
                TagSet::Empty => {}
            }
        }

        (frequencies, malformed)
    }

    /// Give every row exactly one memory band and one time band.
    fn assign_bands(&mut self) {
        for row in &mut self.rows {
            row.memory_band = Some(MemoryBand::classify(row.memory_kb));
            row.time_band = Some(TimeBand::classify(row.time_ms));
        }
    }

    // ── Derived aggregations ──────────────────────────────────────────────────

    /// Submission counts per programming language, count descending.
    pub fn language_distribution(&self) -> Vec<(String, u64)> {
        self.count_by(|row| row.language.clone())
    }

    /// Submission counts per verdict, count descending.
    pub fn verdict_distribution(&self) -> Vec<(String, u64)> {
        self.count_by(|row| row.verdict.clone())
    }

    /// Accepted rows as a percentage of all rows (0 for an empty table).
    pub fn success_rate(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let accepted = self.rows.iter().filter(|r| r.is_accepted()).count();
        accepted as f64 / self.rows.len() as f64 * 100.0
    }

    /// Row counts per memory band, in band order.
    pub fn memory_band_counts(&self) -> [(&'static str, u64); 4] {
        let mut counts = [0u64; 4];
        for row in &self.rows {
            if let Some(band) = row.memory_band {
                let idx = MemoryBand::ALL.iter().position(|b| *b == band);
                if let Some(idx) = idx {
                    counts[idx] += 1;
                }
            }
        }
        [
            (MemoryBand::ALL[0].label(), counts[0]),
            (MemoryBand::ALL[1].label(), counts[1]),
            (MemoryBand::ALL[2].label(), counts[2]),
            (MemoryBand::ALL[3].label(), counts[3]),
        ]
    }

    /// Row counts per time band, in band order.
    pub fn time_band_counts(&self) -> [(&'static str, u64); 4] {
        let mut counts = [0u64; 4];
        for row in &self.rows {
            if let Some(band) = row.time_band {
                let idx = TimeBand::ALL.iter().position(|b| *b == band);
                if let Some(idx) = idx {
                    counts[idx] += 1;
                }
            }
        }
        [
            (TimeBand::ALL[0].label(), counts[0]),
            (TimeBand::ALL[1].label(), counts[1]),
            (TimeBand::ALL[2].label(), counts[2]),
            (TimeBand::ALL[3].label(), counts[3]),
        ]
    }

    /// Row counts per 100-point difficulty bucket, bucket ascending.
    /// Unrated rows (only possible before cleaning) are skipped.
    pub fn difficulty_histogram(&self) -> Vec<(u32, u64)> {
        let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
        for row in &self.rows {
            if let Some(value) = row.difficulty.value() {
                *buckets.entry(value / 100 * 100).or_insert(0) += 1;
            }
        }
        buckets.into_iter().collect()
    }

    /// Accepted-row counts per problem index, index ascending.
    pub fn accepted_by_index(&self) -> Vec<(String, u64)> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for row in self.rows.iter().filter(|r| r.is_accepted()) {
            *counts.entry(row.problem_index.clone()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Difficulty column as floats (rated rows only).
    pub fn difficulties(&self) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.difficulty.value())
            .map(f64::from)
            .collect()
    }

    /// Time column (ms) as floats.
    pub fn times_ms(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.time_ms as f64).collect()
    }

    /// Memory column (KB) as floats.
    pub fn memories_kb(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.memory_kb).collect()
    }

    fn count_by(&self, key: impl Fn(&TableRow) -> String) -> Vec<(String, u64)> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(key(row)).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

/// Round to the nearest multiple of 100 (half away from zero).
fn round_to_hundred(value: f64) -> u32 {
    ((value / 100.0).round() * 100.0) as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
