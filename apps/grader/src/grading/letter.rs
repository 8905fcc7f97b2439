//! Percent and letter-grade arithmetic.
//!
//! Letters are read off the unrounded percent; the rounded one is for display.

/// Percent thresholds, highest first. The first threshold the percent reaches wins.
const LETTER_THRESHOLDS: &[(f64, &str)] = &[
    (97.0, "A+"),
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

/// Grade used when the percent is below every threshold (or not a number).
pub const FAILING_GRADE: &str = "F";

/// Converts a percent (0–100, may exceed 100) into a letter grade.
pub fn letter_grade(percent: f64) -> &'static str {
    LETTER_THRESHOLDS
        .iter()
        .find(|(min, _)| percent >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(FAILING_GRADE)
}

/// `100 * score / max` when `max > 0`, otherwise `0.0`.
/// Non-finite results collapse to `0.0` as well.
pub fn exact_percent(score: f64, max: f64) -> f64 {
    if max.is_nan() || max <= 0.0 {
        return 0.0;
    }
    let pct = score / max * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// `exact_percent` rounded to one decimal place.
pub fn percent(score: f64, max: f64) -> f64 {
    round_to_tenth(exact_percent(score, max))
}

/// Rounds to the nearest tenth of the exact binary value, ties to even.
/// Float formatting rounds the exact decimal expansion, so `12.25` becomes
/// `12.2` and `0.35` (stored as `0.34999...`) becomes `0.3`.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(97.0), "A+");
        assert_eq!(letter_grade(96.9), "A");
        assert_eq!(letter_grade(93.0), "A");
        assert_eq!(letter_grade(92.9), "A-");
        assert_eq!(letter_grade(90.0), "A-");
        assert_eq!(letter_grade(89.9), "B+");
        assert_eq!(letter_grade(87.0), "B+");
        assert_eq!(letter_grade(83.0), "B");
        assert_eq!(letter_grade(80.0), "B-");
        assert_eq!(letter_grade(79.9), "C+");
        assert_eq!(letter_grade(77.0), "C+");
        assert_eq!(letter_grade(75.0), "C");
        assert_eq!(letter_grade(73.0), "C");
        assert_eq!(letter_grade(70.0), "C-");
        assert_eq!(letter_grade(67.0), "D+");
        assert_eq!(letter_grade(63.0), "D");
        assert_eq!(letter_grade(60.0), "D-");
        assert_eq!(letter_grade(59.9), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_letter_grade_out_of_range() {
        assert_eq!(letter_grade(120.0), "A+");
        assert_eq!(letter_grade(-5.0), "F");
        assert_eq!(letter_grade(f64::NAN), "F");
    }

    #[test]
    fn test_thresholds_are_strictly_descending() {
        for pair in LETTER_THRESHOLDS.windows(2) {
            assert!(pair[0].0 > pair[1].0, "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_percent_rounds_to_one_decimal() {
        assert_eq!(percent(15.0, 20.0), 75.0);
        assert_eq!(percent(2.0, 3.0), 66.7);
        assert_eq!(percent(1.0, 3.0), 33.3);
        assert_eq!(percent(17.5, 20.0), 87.5);
    }

    #[test]
    fn test_percent_zero_or_negative_max_is_zero() {
        assert_eq!(percent(5.0, 0.0), 0.0);
        assert_eq!(percent(0.0, 0.0), 0.0);
        assert_eq!(percent(5.0, -10.0), 0.0);
        assert_eq!(percent(5.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_percent_non_finite_score_is_zero() {
        assert_eq!(percent(f64::INFINITY, 10.0), 0.0);
        assert_eq!(percent(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn test_percent_ties_round_to_even() {
        assert_eq!(percent(49.0, 400.0), 12.2);
        assert_eq!(round_to_tenth(0.25), 0.2);
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(0.35), 0.3);
        assert_eq!(round_to_tenth(-2.25), -2.2);
    }

    #[test]
    fn test_exact_percent_is_unrounded() {
        let pct = exact_percent(29.09, 30.0);
        assert!(pct < 97.0 && pct > 96.9);
        assert_eq!(percent(29.09, 30.0), 97.0);
        assert_eq!(exact_percent(5.0, 0.0), 0.0);
        assert_eq!(exact_percent(f64::INFINITY, 10.0), 0.0);
    }
}
