//! Coarse trend classification from pivot slope

use super::pivots::Pivot;

/// How many pivots back the slope is measured over
pub const TREND_LOOKBACK: usize = 7;

/// `true` (bullish) when the last pivot sits strictly above the pivot `TREND_LOOKBACK - 1`
/// places earlier (or the first pivot, for short sequences). Fewer than two pivots default
/// to bullish.
pub fn classify_trend(pivots: &[Pivot]) -> bool {
    let len = pivots.len();
    if len < 2 {
        return true;
    }
    pivots[len - 1].price > pivots[len.saturating_sub(TREND_LOOKBACK)].price
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
                index: i * 5,
                time: String::new(),
                price,
                kind: if i % 2 == 0 { PivotKind::Low } else { PivotKind::High },
            })
            .collect()
    }

    #[test]
    fn test_short_sequences_default_bullish() {
        assert!(classify_trend(&[]));
        assert!(classify_trend(&pivots(&[50.0])));
    }

    #[test]
    fn test_compares_against_first_when_short() {
        assert!(classify_trend(&pivots(&[10.0, 12.0])));
        assert!(!classify_trend(&pivots(&[10.0, 8.0])));
        // Equal is not bullish
        assert!(!classify_trend(&pivots(&[10.0, 10.0])));
    }

    #[test]
    fn test_uses_seventh_pivot_from_end() {
        // len 9 -> anchor is index 2 (price 30)
        let p = pivots(&[100.0, 1.0, 30.0, 5.0, 5.0, 5.0, 5.0, 5.0, 31.0]);
        assert!(classify_trend(&p));
        let p = pivots(&[1.0, 100.0, 30.0, 5.0, 5.0, 5.0, 5.0, 5.0, 29.0]);
        assert!(!classify_trend(&p));
    }
}
