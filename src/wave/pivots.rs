//! Swing pivot detection (ZigZag)
//!
//! A bar is a swing high when its high is strictly above the highs of `depth` bars on each
//! side; a swing low is the mirror test on lows. Confirmed swings are then merged into a
//! strictly alternating High/Low sequence, keeping the most extreme point of each run.

use serde::{Deserialize, Serialize};

use crate::OHLC;

/// Side of a swing point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// Confirmed swing point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pivot {
    /// Position in the candle sequence
    pub index: usize,
    pub time: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: PivotKind,
}

impl Pivot {
    #[inline]
    pub fn is_high(&self) -> bool {
        self.kind == PivotKind::High
    }

    #[inline]
    pub fn is_low(&self) -> bool {
        self.kind == PivotKind::Low
    }

    /// `true` if `other` is further out in this pivot's direction
    #[inline]
    fn is_exceeded_by(&self, other: &Pivot) -> bool {
        match self.kind {
            PivotKind::High => other.price > self.price,
            PivotKind::Low => other.price < self.price,
        }
    }
}

/// Minimum number of bars needed to confirm a single swing at `depth`
#[inline]
pub fn min_bars_for_depth(depth: usize) -> usize {
    2 * depth + 1
}

/// Check: is bar `i` a swing high with `depth` strictly lower highs on both sides
pub fn is_swing_high<T: OHLC>(bars: &[T], i: usize, depth: usize) -> bool {
    if i < depth || i + depth >= bars.len() {
        return false;
    }
    let hi = bars[i].high();
    bars[i - depth..i].iter().all(|b| b.high() < hi)
        && bars[i + 1..=i + depth].iter().all(|b| b.high() < hi)
}

/// Check: is bar `i` a swing low with `depth` strictly higher lows on both sides
pub fn is_swing_low<T: OHLC>(bars: &[T], i: usize, depth: usize) -> bool {
    if i < depth || i + depth >= bars.len() {
        return false;
    }
    let lo = bars[i].low();
    bars[i - depth..i].iter().all(|b| b.low() > lo)
        && bars[i + 1..=i + depth].iter().all(|b| b.low() > lo)
}

/// Reduce `bars` to an alternating sequence of swing highs and lows.
///
/// Returns an empty vector when fewer than `2 * depth + 1` bars are supplied. A bar passing
/// both tests is recorded as a high.
pub fn find_pivots<T: OHLC>(bars: &[T], depth: usize) -> Vec<Pivot> {
    if bars.len() < min_bars_for_depth(depth) {
        return Vec::new();
    }

    // Candidates come out in index order, so no explicit sort is needed.
    let candidates = (depth..bars.len() - depth).filter_map(|i| {
        let bar = &bars[i];
        let (price, kind) = if is_swing_high(bars, i, depth) {
            (bar.high(), PivotKind::High)
        } else if is_swing_low(bars, i, depth) {
            (bar.low(), PivotKind::Low)
        } else {
            return None;
        };
        Some(Pivot { index: i, time: bar.time().to_owned(), price, kind })
    });

    let mut pivots: Vec<Pivot> = Vec::new();
    for candidate in candidates {
        if let Some(last) = pivots.last_mut() {
            if last.kind == candidate.kind {
                if last.is_exceeded_by(&candidate) {
                    *last = candidate;
                }
                continue;
            }
        }
        pivots.push(candidate);
    }
    pivots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candle;

    fn bars_from_mids(mids: &[f64]) -> Vec<Candle> {
        mids.iter()
            .enumerate()
            .map(|(i, &m)| Candle::new(format!("d{i}"), m, m + 1.0, m - 1.0, m))
            .collect()
    }

    #[test]
    fn test_too_few_bars() {
        let bars = bars_from_mids(&[1.0, 2.0, 3.0, 2.0, 1.0]);
        assert!(find_pivots(&bars, 3).is_empty());
        assert_eq!(find_pivots(&bars, 2).len(), 1);
    }

    #[test]
    fn test_single_peak() {
        let bars = bars_from_mids(&[1.0, 2.0, 3.0, 2.0, 1.0]);
        let pivots = find_pivots(&bars, 2);
        assert_eq!(pivots[0].index, 2);
        assert_eq!(pivots[0].kind, PivotKind::High);
        assert_eq!(pivots[0].price, 4.0);
        assert_eq!(pivots[0].time, "d2");
    }

    #[test]
    fn test_equal_neighbour_is_not_a_swing() {
        let bars = bars_from_mids(&[1.0, 3.0, 3.0, 2.0, 1.0]);
        assert!(!is_swing_high(&bars, 1, 1));
        assert!(!is_swing_high(&bars, 2, 1));
    }

    #[test]
    fn test_same_kind_run_keeps_most_extreme() {
        // Two highs at depth 1 with no low between them confirmed by depth 1
        let bars = vec![
            Candle::new("a", 1.0, 2.0, 0.0, 1.0),
            Candle::new("b", 1.0, 5.0, 0.5, 1.0),
            Candle::new("c", 1.0, 4.0, 0.5, 1.0),
            Candle::new("d", 1.0, 6.0, 0.6, 1.0),
            Candle::new("e", 1.0, 3.0, 0.7, 1.0),
        ];
        let pivots = find_pivots(&bars, 1);
        let highs: Vec<_> = pivots.iter().filter(|p| p.is_high()).collect();
        assert_eq!(highs.len(), 1);
        assert_eq!(highs[0].index, 3);
        assert_eq!(highs[0].price, 6.0);
    }

    #[test]
    fn test_outside_bar_counts_as_high() {
        let bars = vec![
            Candle::new("a", 5.0, 6.0, 4.0, 5.0),
            Candle::new("b", 5.0, 9.0, 1.0, 5.0),
            Candle::new("c", 5.0, 6.0, 4.0, 5.0),
        ];
        let pivots = find_pivots(&bars, 1);
        assert_eq!(pivots.len(), 1);
        assert_eq!(pivots[0].kind, PivotKind::High);
    }

    #[test]
    fn test_alternation() {
        let mids: Vec<f64> = (0..60).map(|i| ((i as f64) * 0.7).sin() * 10.0 + 50.0).collect();
        let pivots = find_pivots(&bars_from_mids(&mids), 2);
        assert!(pivots.len() > 4);
        for pair in pivots.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
            assert_ne!(pair[0].is_low(), pair[1].is_low());
            assert!(pair[0].index < pair[1].index);
        }
    }
}
