//! Trailing average over per-decision rates.

/// Mean of the last `window` known values at indices `<= index`.
///
/// Unknown (`None`) entries are skipped rather than counted as zero, so the
/// window reaches further back past gaps. An `index` past the end is clamped
/// to the last element. Returns `None` if nothing in range is known or
/// `window` is zero.
pub fn trailing_average(values: &[Option<f64>], index: usize, window: usize) -> Option<f64> {
    if values.is_empty() || window == 0 {
        return None;
    }
    let end = index.min(values.len() - 1);

    let known: Vec<f64> = values[..=end]
        .iter()
        .rev()
        .filter_map(|v| *v)
        .filter(|v| v.is_finite())
        .take(window)
        .collect();

    if known.is_empty() {
        return None;
    }
    Some(known.iter().sum::<f64>() / known.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fewer_than_window_is_plain_mean() {
        let values = [Some(10.0), Some(11.0), Some(12.0)];
        assert_relative_eq!(trailing_average(&values, 2, 12).unwrap(), 11.0);
    }

    #[test]
    fn missing_values_are_skipped_not_zeroed() {
        let values = [Some(10.0), None, Some(14.0), None];
        assert_relative_eq!(trailing_average(&values, 3, 12).unwrap(), 12.0);
    }

    #[test]
    fn window_keeps_most_recent_known_values() {
        let values: Vec<Option<f64>> = (1..=15).map(|v| Some(v as f64)).collect();
        // Last 12 of 1..=15 are 4..=15, mean 9.5.
        assert_relative_eq!(trailing_average(&values, 14, 12).unwrap(), 9.5);
        // Up to index 4 only 1..=5 are visible.
        assert_relative_eq!(trailing_average(&values, 4, 12).unwrap(), 3.0);
    }

    #[test]
    fn window_skips_gaps_to_fill_up() {
        let values = [Some(1.0), Some(2.0), None, Some(3.0)];
        assert_relative_eq!(trailing_average(&values, 3, 2).unwrap(), 2.5);
    }

    #[test]
    fn nothing_known_is_unknown() {
        assert_eq!(trailing_average(&[None, None], 1, 12), None);
        assert_eq!(trailing_average(&[], 0, 12), None);
        assert_eq!(trailing_average(&[Some(1.0)], 0, 0), None);
    }

    #[test]
    fn index_past_end_is_clamped() {
        let values = [Some(2.0), Some(4.0)];
        assert_relative_eq!(trailing_average(&values, 10, 12).unwrap(), 3.0);
    }
}
