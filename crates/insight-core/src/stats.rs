// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using standard linear
/// interpolation.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── Describe ──────────────────────────────────────────────────────────────────

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (0.0 for fewer than two observations).
    pub std: f64,
    /// Smallest observation.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Largest observation.
    pub max: f64,
}

/// Summarize `values` with count, mean, sample std, min, quartiles and max.
///
/// Returns `None` for an empty input; order of `values` does not matter.
pub fn describe(values: &[f64]) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let std = if count < 2 {
        0.0
    } else {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count as f64 - 1.0)).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(Describe {
        count,
        mean,
        std,
        min: sorted[0],
        q25: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q75: percentile(&sorted, 75.0),
        max: sorted[count - 1],
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── percentile ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentile_empty_returns_zero() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_single_element() {
        assert_eq!(percentile(&[42.0], 0.0), 42.0);
        assert_eq!(percentile(&[42.0], 50.0), 42.0);
        assert_eq!(percentile(&[42.0], 100.0), 42.0);
    }

    #[test]
    fn test_percentile_p50_even() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        // rank = 0.5 * 3 = 1.5 → interpolate between data[1]=2 and data[2]=3
        assert!((percentile(&data, 50.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_p25() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        // rank = 0.25 * 3 = 0.75 → 1 + 0.75*(2-1) = 1.75
        assert!((percentile(&data, 25.0) - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_endpoints() {
        let data = vec![10.0, 20.0, 30.0];
        assert!((percentile(&data, 0.0) - 10.0).abs() < 1e-9);
        assert!((percentile(&data, 100.0) - 30.0).abs() < 1e-9);
    }

    // ── describe ─────────────────────────────────────────────────────────────

    #[test]
    fn test_describe_empty_returns_none() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn test_describe_single_value() {
        let d = describe(&[7.0]).unwrap();
        assert_eq!(d.count, 1);
        assert!((d.mean - 7.0).abs() < 1e-9);
        assert_eq!(d.std, 0.0);
        assert_eq!(d.min, 7.0);
        assert_eq!(d.max, 7.0);
        assert_eq!(d.median, 7.0);
    }

    #[test]
    fn test_describe_basic() {
        let d = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(d.count, 4);
        assert!((d.mean - 2.5).abs() < 1e-9);
        // Sample std of 1..4 = sqrt(5/3)
        assert!((d.std - (5.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(d.min, 1.0);
        assert!((d.q25 - 1.75).abs() < 1e-9);
        assert!((d.median - 2.5).abs() < 1e-9);
        assert!((d.q75 - 3.25).abs() < 1e-9);
        assert_eq!(d.max, 4.0);
    }

    #[test]
    fn test_describe_order_independent() {
        let a = describe(&[3.0, 1.0, 4.0, 2.0]).unwrap();
        let b = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((a.median - b.median).abs() < 1e-9);
        assert!((a.q25 - b.q25).abs() < 1e-9);
        assert_eq!(a.min, b.min);
        assert_eq!(a.max, b.max);
    }

    #[test]
    fn test_describe_identical_values_zero_std() {
        let d = describe(&[5.0, 5.0, 5.0]).unwrap();
        assert!((d.std - 0.0).abs() < 1e-9);
        assert_eq!(d.min, d.max);
    }
}
