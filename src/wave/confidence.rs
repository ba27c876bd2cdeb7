//! Fibonacci rule scoring of the last impulse-shaped leg sequence

use serde::{Deserialize, Serialize};

use super::helpers::within;
use super::pivots::Pivot;

/// Pivots needed to form the four scored legs
pub const MIN_SCORED_PIVOTS: usize = 5;

/// Score 0..=100 for how well the last four pivot-to-pivot legs follow classical ratios.
///
/// Uses the last five pivots only, independent of the structural anchors:
///
/// | rule | full | partial |
/// |---|---|---|
/// | leg 3 not the shortest of 1, 3, 4 | 30 | - |
/// | leg2 / leg1 in 0.382..=0.786 (0.236..=0.886) | 25 | 12 |
/// | leg3 / leg1 in 1.272..=2.618 (1.0..=3.0) | 25 | 12 |
/// | leg4 / leg3 in 0.236..=0.5 (0.146..=0.618) | 20 | 10 |
///
/// Ratio rules with a zero-length divisor leg score nothing.
pub fn score_confidence(pivots: &[Pivot]) -> u8 {
    if pivots.len() < MIN_SCORED_PIVOTS {
        return 0;
    }
    let last = &pivots[pivots.len() - MIN_SCORED_PIVOTS..];
    let leg = |i: usize| (last[i + 1].price - last[i].price).abs();
    let (l1, l2, l3, l4) = (leg(0), leg(1), leg(2), leg(3));

    let mut score = 0u8;
    if l3 >= l1 && l3 >= l4 {
        score += 30;
    }
    score += tiered(ratio(l2, l1), (0.382, 0.786, 25), (0.236, 0.886, 12));
    score += tiered(ratio(l3, l1), (1.272, 2.618, 25), (1.0, 3.0, 12));
    score += tiered(ratio(l4, l3), (0.236, 0.5, 20), (0.146, 0.618, 10));
    score
}

#[inline]
fn ratio(num: f64, den: f64) -> Option<f64> {
    (den != 0.0).then(|| num / den)
}

fn tiered(value: Option<f64>, full: (f64, f64, u8), partial: (f64, f64, u8)) -> u8 {
    match value {
        Some(v) if within(v, full.0, full.1) => full.2,
        Some(v) if within(v, partial.0, partial.1) => partial.2,
        _ => 0,
    }
}

/// Coarse bucket of a confidence score used in narrative output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceGrade {
    High,
    Moderate,
    Low,
}

impl ConfidenceGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => ConfidenceGrade::High,
            40..=69 => ConfidenceGrade::Moderate,
            _ => ConfidenceGrade::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceGrade::High => "high",
            ConfidenceGrade::Moderate => "moderate",
            ConfidenceGrade::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::pivots::PivotKind;

    fn pivots(prices: &[f64]) -> Vec<Pivot> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Pivot {
                index: i,
                time: String::new(),
                price,
                kind: if i % 2 == 0 { PivotKind::Low } else { PivotKind::High },
            })
            .collect()
    }

    #[test]
    fn test_fewer_than_five_is_zero() {
        assert_eq!(score_confidence(&pivots(&[100.0, 110.0, 105.0, 120.0])), 0);
        assert_eq!(score_confidence(&[]), 0);
    }

    #[test]
    fn test_textbook_impulse_scores_full() {
        // l1 = 10, l2 = 5 (0.5), l3 = 20 (2.0), l4 = 6 (0.3)
        let p = pivots(&[100.0, 110.0, 105.0, 125.0, 119.0]);
        assert_eq!(score_confidence(&p), 100);
    }

    #[test]
    fn test_partial_tiers() {
        // l1 = 10, l2 = 8.5 (0.85), l3 = 11 (1.1), l4 = 6.6 (0.6)
        let p = pivots(&[100.0, 110.0, 101.5, 112.5, 105.9]);
        assert_eq!(score_confidence(&p), 30 + 12 + 12 + 10);
    }

    #[test]
    fn test_only_last_five_used() {
        let mut prices = vec![1.0, 1000.0, 3.0];
        prices.extend([100.0, 110.0, 105.0, 125.0, 119.0]);
        assert_eq!(score_confidence(&pivots(&prices)), 100);
    }

    #[test]
    fn test_zero_divisor_skips_ratio_rules() {
        // l1 = 0 and l3 = 0 skip every ratio rule; leg 3 is shorter than leg 4
        let p = pivots(&[100.0, 100.0, 90.0, 90.0, 95.0]);
        assert_eq!(score_confidence(&p), 0);
        let p = pivots(&[100.0, 100.0, 90.0, 90.0, 90.0]);
        assert_eq!(score_confidence(&p), 30);
    }

    #[test]
    fn test_grade_buckets() {
        assert_eq!(ConfidenceGrade::from_score(100), ConfidenceGrade::High);
        assert_eq!(ConfidenceGrade::from_score(70), ConfidenceGrade::High);
        assert_eq!(ConfidenceGrade::from_score(69), ConfidenceGrade::Moderate);
        assert_eq!(ConfidenceGrade::from_score(40), ConfidenceGrade::Moderate);
        assert_eq!(ConfidenceGrade::from_score(0), ConfidenceGrade::Low);
    }
}
