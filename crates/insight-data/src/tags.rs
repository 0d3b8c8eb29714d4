//! Tag-frequency aggregation.

use std::collections::HashMap;

// ── TagFrequencies ────────────────────────────────────────────────────────────

/// Occurrence counts per tag name across all rows' tag sets.
///
/// Duplicates are counted; insertion order is irrelevant. Ranked extraction
/// sorts by count descending, then by name, so results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TagFrequencies {
    counts: HashMap<String, u64>,
}

impl TagFrequencies {
    /// Record a single occurrence of `tag`.
    pub fn record(&mut self, tag: &str) {
        *self.counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    /// Record one occurrence per element of `tags`.
    pub fn extend<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            self.record(tag);
        }
    }

    /// Occurrences of `tag` (0 when never seen).
    pub fn count(&self, tag: &str) -> u64 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The `n` most frequent tags, count descending, ties broken by name.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TagFrequencies {
        let mut freq = TagFrequencies::default();
        for tag in ["dp", "math", "dp", "greedy", "dp", "math"] {
            freq.record(tag);
        }
        freq
    }

    #[test]
    fn test_counts_accumulate() {
        let freq = sample();
        assert_eq!(freq.count("dp"), 3);
        assert_eq!(freq.count("math"), 2);
        assert_eq!(freq.count("greedy"), 1);
        assert_eq!(freq.count("graphs"), 0);
    }

    #[test]
    fn test_total_and_len() {
        let freq = sample();
        assert_eq!(freq.len(), 3);
        assert_eq!(freq.total(), 6);
    }

    #[test]
    fn test_extend() {
        let mut freq = TagFrequencies::default();
        let tags = vec!["dp".to_string(), "dp".to_string(), "trees".to_string()];
        freq.extend(&tags);
        assert_eq!(freq.count("dp"), 2);
        assert_eq!(freq.count("trees"), 1);
    }

    #[test]
    fn test_top_orders_by_count_then_name() {
        let freq = sample();
        let top = freq.top(10);
        assert_eq!(
            top,
            vec![
                ("dp".to_string(), 3),
                ("math".to_string(), 2),
                ("greedy".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_truncates() {
        let freq = sample();
        assert_eq!(freq.top(1).len(), 1);
        assert_eq!(freq.top(1)[0].0, "dp");
    }

    #[test]
    fn test_top_tie_break_is_alphabetical() {
        let mut freq = TagFrequencies::default();
        freq.record("zeta");
        freq.record("alpha");
        let top = freq.top(2);
        assert_eq!(top[0].0, "alpha");
        assert_eq!(top[1].0, "zeta");
    }

    #[test]
    fn test_empty() {
        let freq = TagFrequencies::default();
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
        assert!(freq.top(5).is_empty());
    }
}
