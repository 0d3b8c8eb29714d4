use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdict string the Codeforces API uses for an accepted submission.
pub const ACCEPTED_VERDICT: &str = "OK";

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Problem difficulty rating, or the absence of one.
///
/// Old and unofficial problems carry no rating; those rows start out as
/// [`Difficulty::Unrated`] and are replaced by an imputed value during
/// cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// A known numeric rating (e.g. 800, 1900).
    Rated(u32),
    /// The API returned no rating for this problem.
    Unrated,
}

impl Difficulty {
    /// The numeric rating, or `None` when unrated.
    pub fn value(&self) -> Option<u32> {
        match self {
            Difficulty::Rated(v) => Some(*v),
            Difficulty::Unrated => None,
        }
    }

    pub fn is_rated(&self) -> bool {
        matches!(self, Difficulty::Rated(_))
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Rated(v) => write!(f, "{}", v),
            Difficulty::Unrated => write!(f, "Unrated"),
        }
    }
}

// ── TagSet ────────────────────────────────────────────────────────────────────

/// Topic tags attached to a problem.
///
/// Distinguishes "the problem has no tags" from "the tag payload could not
/// be parsed" so that malformed data is reported instead of silently
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagSet {
    /// No tags were present in the API response.
    Empty,
    /// Parsed tag list (never empty; an empty list maps to [`TagSet::Empty`]).
    Tags(Vec<String>),
    /// The tag payload was not a list of strings; the raw text is kept for
    /// the cleaning report.
    Malformed(String),
}

impl TagSet {
    /// Build a tag set from the raw `problem.tags` JSON value.
    ///
    /// Accepts both the structured form (a JSON array of strings) and the
    /// literal-list form (a JSON string whose content is itself a JSON
    /// array of strings). Anything else is preserved as [`TagSet::Malformed`].
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return TagSet::Empty;
        };

        match value {
            serde_json::Value::Null => TagSet::Empty,
            serde_json::Value::Array(items) => {
                let mut tags = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => tags.push(s.to_string()),
                        None => return TagSet::Malformed(value.to_string()),
                    }
                }
                Self::from_list(tags)
            }
            serde_json::Value::String(raw) => {
                match serde_json::from_str::<Vec<String>>(raw) {
                    Ok(tags) => Self::from_list(tags),
                    Err(_) => TagSet::Malformed(raw.clone()),
                }
            }
            other => TagSet::Malformed(other.to_string()),
        }
    }

    fn from_list(tags: Vec<String>) -> Self {
        if tags.is_empty() {
            TagSet::Empty
        } else {
            TagSet::Tags(tags)
        }
    }

    /// The parsed tags; empty slice for `Empty` and `Malformed`.
    pub fn tags(&self) -> &[String] {
        match self {
            TagSet::Tags(tags) => tags,
            _ => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, TagSet::Malformed(_))
    }
}

// ── Categorical bands ─────────────────────────────────────────────────────────

/// Memory-consumption band, in kibibytes.
///
/// Bands are lower-bound-exclusive and upper-bound-inclusive, except that
/// the lowest band also contains zero, so classification is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryBand {
    UpTo100,
    UpTo1000,
    UpTo5000,
    Over5000,
}

impl MemoryBand {
    /// All bands in ascending order.
    pub const ALL: [MemoryBand; 4] = [
        MemoryBand::UpTo100,
        MemoryBand::UpTo1000,
        MemoryBand::UpTo5000,
        MemoryBand::Over5000,
    ];

    /// Assign a memory value (KB) to its band.
    pub fn classify(kb: f64) -> Self {
        if kb <= 100.0 {
            MemoryBand::UpTo100
        } else if kb <= 1000.0 {
            MemoryBand::UpTo1000
        } else if kb <= 5000.0 {
            MemoryBand::UpTo5000
        } else {
            MemoryBand::Over5000
        }
    }

    /// Display label for this band.
    pub fn label(self) -> &'static str {
        match self {
            MemoryBand::UpTo100 => "0-100 KB",
            MemoryBand::UpTo1000 => "101-1000 KB",
            MemoryBand::UpTo5000 => "1001-5000 KB",
            MemoryBand::Over5000 => "5000+ KB",
        }
    }
}

/// Execution-time band, in milliseconds.
///
/// Same boundary convention as [`MemoryBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBand {
    UpTo100,
    UpTo150,
    UpTo200,
    Over200,
}

impl TimeBand {
    /// All bands in ascending order.
    pub const ALL: [TimeBand; 4] = [
        TimeBand::UpTo100,
        TimeBand::UpTo150,
        TimeBand::UpTo200,
        TimeBand::Over200,
    ];

    /// Assign a time value (ms) to its band.
    pub fn classify(ms: u64) -> Self {
        if ms <= 100 {
            TimeBand::UpTo100
        } else if ms <= 150 {
            TimeBand::UpTo150
        } else if ms <= 200 {
            TimeBand::UpTo200
        } else {
            TimeBand::Over200
        }
    }

    /// Display label for this band.
    pub fn label(self) -> &'static str {
        match self {
            TimeBand::UpTo100 => "0-100 ms",
            TimeBand::UpTo150 => "101-150 ms",
            TimeBand::UpTo200 => "151-200 ms",
            TimeBand::Over200 => "200+ ms",
        }
    }
}

// ── Submission ────────────────────────────────────────────────────────────────

/// A single submission as returned by the `user.status` endpoint.
///
/// Immutable once fetched; the cleaning pipeline copies these into working
/// table rows before mutating anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: u64,
    /// UTC timestamp when the submission was made.
    pub submitted_at: DateTime<Utc>,
    /// Contest the problem belongs to.
    pub contest_id: i64,
    /// Problem index within the contest (e.g. `"A"`, `"C1"`).
    pub problem_index: String,
    /// Problem name.
    pub problem_name: String,
    /// Difficulty rating, or unrated.
    pub difficulty: Difficulty,
    /// Topic tags.
    pub tags: TagSet,
    /// Participant type (e.g. `"CONTESTANT"`, `"PRACTICE"`).
    pub participant_type: String,
    /// Programming language used.
    pub language: String,
    /// Verdict string (e.g. `"OK"`, `"WRONG_ANSWER"`).
    pub verdict: String,
    /// Time consumed in milliseconds.
    pub time_ms: u64,
    /// Memory consumed in kibibytes (fractional, from bytes / 1024).
    pub memory_kb: f64,
}

impl Submission {
    /// Whether this submission was accepted.
    pub fn is_accepted(&self) -> bool {
        self.verdict == ACCEPTED_VERDICT
    }
}

// ── RatingChange ──────────────────────────────────────────────────────────────

/// One rated-contest participation from the `user.rating` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    /// Contest identifier.
    pub contest_id: i64,
    /// Contest name.
    pub contest_name: String,
    /// Final rank in the contest.
    pub rank: u32,
    /// Rating before the contest.
    pub old_rating: i32,
    /// Rating after the contest.
    pub new_rating: i32,
    /// UTC timestamp when the rating was updated.
    pub updated_at: DateTime<Utc>,
}

impl RatingChange {
    /// Signed rating delta for this contest.
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // ── Difficulty ───────────────────────────────────────────────────────────

    #[test]
    fn test_difficulty_value() {
        assert_eq!(Difficulty::Rated(1400).value(), Some(1400));
        assert_eq!(Difficulty::Unrated.value(), None);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Rated(800).to_string(), "800");
        assert_eq!(Difficulty::Unrated.to_string(), "Unrated");
    }

    // ── TagSet::from_value ───────────────────────────────────────────────────

    #[test]
    fn test_tagset_missing_is_empty() {
        assert_eq!(TagSet::from_value(None), TagSet::Empty);
        assert_eq!(TagSet::from_value(Some(&json!(null))), TagSet::Empty);
    }

    #[test]
    fn test_tagset_array_of_strings() {
        let value = json!(["dp", "graphs"]);
        assert_eq!(
            TagSet::from_value(Some(&value)),
            TagSet::Tags(vec!["dp".to_string(), "graphs".to_string()])
        );
    }

    #[test]
    fn test_tagset_empty_array_is_empty() {
        let value = json!([]);
        assert_eq!(TagSet::from_value(Some(&value)), TagSet::Empty);
    }

    #[test]
    fn test_tagset_literal_list_string() {
        let value = json!("[\"math\", \"greedy\"]");
        assert_eq!(
            TagSet::from_value(Some(&value)),
            TagSet::Tags(vec!["math".to_string(), "greedy".to_string()])
        );
    }

    #[test]
    fn test_tagset_unparseable_string_is_malformed() {
        let value = json!("not a list");
        let parsed = TagSet::from_value(Some(&value));
        assert!(parsed.is_malformed());
        assert_eq!(parsed, TagSet::Malformed("not a list".to_string()));
    }

    #[test]
    fn test_tagset_mixed_array_is_malformed() {
        let value = json!(["dp", 42]);
        assert!(TagSet::from_value(Some(&value)).is_malformed());
    }

    #[test]
    fn test_tagset_number_is_malformed() {
        let value = json!(7);
        assert!(TagSet::from_value(Some(&value)).is_malformed());
    }

    #[test]
    fn test_tagset_tags_accessor() {
        let tags = TagSet::Tags(vec!["dp".to_string()]);
        assert_eq!(tags.tags(), &["dp".to_string()]);
        assert!(TagSet::Empty.tags().is_empty());
        assert!(TagSet::Malformed("x".to_string()).tags().is_empty());
    }

    // ── Bands ────────────────────────────────────────────────────────────────

    #[test]
    fn test_memory_band_boundaries() {
        assert_eq!(MemoryBand::classify(0.0), MemoryBand::UpTo100);
        assert_eq!(MemoryBand::classify(100.0), MemoryBand::UpTo100);
        assert_eq!(MemoryBand::classify(100.1), MemoryBand::UpTo1000);
        assert_eq!(MemoryBand::classify(1000.0), MemoryBand::UpTo1000);
        assert_eq!(MemoryBand::classify(1001.0), MemoryBand::UpTo5000);
        assert_eq!(MemoryBand::classify(5000.0), MemoryBand::UpTo5000);
        assert_eq!(MemoryBand::classify(5000.5), MemoryBand::Over5000);
    }

    #[test]
    fn test_time_band_boundaries() {
        assert_eq!(TimeBand::classify(0), TimeBand::UpTo100);
        assert_eq!(TimeBand::classify(100), TimeBand::UpTo100);
        assert_eq!(TimeBand::classify(101), TimeBand::UpTo150);
        assert_eq!(TimeBand::classify(150), TimeBand::UpTo150);
        assert_eq!(TimeBand::classify(151), TimeBand::UpTo200);
        assert_eq!(TimeBand::classify(200), TimeBand::UpTo200);
        assert_eq!(TimeBand::classify(201), TimeBand::Over200);
    }

    #[test]
    fn test_band_classification_is_total() {
        // Every sample value must land in exactly one band.
        for kb in [0.0, 50.0, 100.0, 500.0, 1000.0, 3000.0, 5000.0, 99999.0] {
            let band = MemoryBand::classify(kb);
            assert_eq!(
                MemoryBand::ALL.iter().filter(|b| **b == band).count(),
                1
            );
        }
        for ms in [0u64, 100, 125, 150, 175, 200, 100_000] {
            let band = TimeBand::classify(ms);
            assert_eq!(TimeBand::ALL.iter().filter(|b| **b == band).count(), 1);
        }
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(MemoryBand::UpTo100.label(), "0-100 KB");
        assert_eq!(MemoryBand::Over5000.label(), "5000+ KB");
        assert_eq!(TimeBand::UpTo100.label(), "0-100 ms");
        assert_eq!(TimeBand::Over200.label(), "200+ ms");
    }

    // ── Submission / RatingChange ────────────────────────────────────────────

    #[test]
    fn test_submission_is_accepted() {
        let mut submission = Submission {
            id: 1,
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            contest_id: 1700,
            problem_index: "A".to_string(),
            problem_name: "Two Buttons".to_string(),
            difficulty: Difficulty::Rated(800),
            tags: TagSet::Empty,
            participant_type: "PRACTICE".to_string(),
            language: "GNU C++17".to_string(),
            verdict: "OK".to_string(),
            time_ms: 62,
            memory_kb: 102.4,
        };
        assert!(submission.is_accepted());

        submission.verdict = "WRONG_ANSWER".to_string();
        assert!(!submission.is_accepted());
    }

    #[test]
    fn test_rating_change_delta() {
        let change = RatingChange {
            contest_id: 1700,
            contest_name: "Codeforces Round 900".to_string(),
            rank: 1234,
            old_rating: 1500,
            new_rating: 1432,
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
        };
        assert_eq!(change.delta(), -68);
    }
}
