//! Classify an announced rate against the market reference.

use crate::domain::Surprise;

/// Slack for decimal literals such as `14.26 - 14.25` not being exactly `0.01`.
const EPS: f64 = 1e-9;

/// Compare `observed` against `expected`.
///
/// `|observed - expected| <= tolerance` is within expectation; ties at the
/// tolerance boundary count as within.
pub fn classify(observed: Option<f64>, expected: Option<f64>, tolerance: f64) -> Surprise {
    let (Some(observed), Some(expected)) = (observed, expected) else {
        return Surprise::Undetermined;
    };
    if !(observed.is_finite() && expected.is_finite()) {
        return Surprise::Undetermined;
    }

    let diff = observed - expected;
    if diff.abs() <= tolerance + EPS {
        Surprise::Within
    } else if diff > 0.0 {
        Surprise::Above
    } else {
        Surprise::Below
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.01;

    #[test]
    fn exact_tolerance_is_within_on_both_sides() {
        assert_eq!(classify(Some(14.26), Some(14.25), TOL), Surprise::Within);
        assert_eq!(classify(Some(14.24), Some(14.25), TOL), Surprise::Within);
        assert_eq!(classify(Some(14.25), Some(14.25), TOL), Surprise::Within);
    }

    #[test]
    fn beyond_tolerance_is_above_or_below() {
        assert_eq!(classify(Some(14.27), Some(14.25), TOL), Surprise::Above);
        assert_eq!(classify(Some(14.23), Some(14.25), TOL), Surprise::Below);
        assert_eq!(classify(Some(15.00), Some(14.25), TOL), Surprise::Above);
    }

    #[test]
    fn missing_side_is_undetermined() {
        assert_eq!(classify(None, Some(14.25), TOL), Surprise::Undetermined);
        assert_eq!(classify(Some(14.25), None, TOL), Surprise::Undetermined);
        assert_eq!(classify(Some(f64::NAN), Some(14.25), TOL), Surprise::Undetermined);
    }
}
