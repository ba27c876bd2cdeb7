//! Structural wave identification
//!
//! Locates the five anchors of an impulse (origin, W1, W2, W3, W4) inside the most recent
//! window of pivots. Bullish and bearish searches share one routine; the trend only decides
//! which price is "further" and how deep a pullback must be to end the first upswing.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::pivots::Pivot;

/// Number of most recent pivots the search looks at
pub const STRUCTURE_WINDOW: usize = 20;

/// Pullback ratio that ends the W1 scan in a bullish search
pub const BULL_PULLBACK: f64 = 0.9;
/// Rally ratio that ends the W1 scan in a bearish search
pub const BEAR_PULLBACK: f64 = 1.1;

/// Indices into the pivot sequence for the five structural anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuralWaves {
    pub origin: usize,
    pub w1: usize,
    pub w2: usize,
    pub w3: usize,
    pub w4: usize,
}

impl StructuralWaves {
    /// All anchors collapsed onto one pivot
    pub fn collapsed(at: usize) -> Self {
        Self { origin: at, w1: at, w2: at, w3: at, w4: at }
    }

    /// Anchors in label order `0..=4`
    pub fn as_array(&self) -> [usize; 5] {
        [self.origin, self.w1, self.w2, self.w3, self.w4]
    }
}

/// Trend-dependent comparisons used by the search
#[derive(Debug, Clone, Copy)]
struct Side {
    is_bull: bool,
    pullback: f64,
}

impl Side {
    fn new(is_bull: bool) -> Self {
        Self { is_bull, pullback: if is_bull { BULL_PULLBACK } else { BEAR_PULLBACK } }
    }

    /// `a` is further in the trend direction than `b`
    #[inline]
    fn beyond(&self, a: f64, b: f64) -> bool {
        if self.is_bull {
            a > b
        } else {
            a < b
        }
    }

    /// `a` is further against the trend direction than `b`
    #[inline]
    fn short_of(&self, a: f64, b: f64) -> bool {
        if self.is_bull {
            a < b
        } else {
            a > b
        }
    }

    /// Price has pulled back far enough from the running extreme to end the first swing
    #[inline]
    fn pulled_back(&self, price: f64, extreme: f64) -> bool {
        self.short_of(price, extreme * self.pullback)
    }
}

/// First index in `range` whose price wins against every earlier one under `prefer`.
fn arg_extreme(pivots: &[Pivot], range: Range<usize>, prefer: impl Fn(f64, f64) -> bool) -> usize {
    let start = range.start;
    range.fold(start, |best, i| if prefer(pivots[i].price, pivots[best].price) { i } else { best })
}

/// Identify anchors using the default window of [`STRUCTURE_WINDOW`] pivots.
pub fn identify_structure(pivots: &[Pivot], is_bull: bool) -> StructuralWaves {
    identify_structure_in_window(pivots, is_bull, STRUCTURE_WINDOW)
}

/// Identify anchors within the last `window` pivots.
///
/// Returned indices refer to the full pivot slice. Fewer than three pivots collapse all
/// anchors onto the start of the window.
pub fn identify_structure_in_window(pivots: &[Pivot], is_bull: bool, window: usize) -> StructuralWaves {
    let end = pivots.len();
    let recent_start = end.saturating_sub(window);
    if end < 3 {
        return StructuralWaves::collapsed(recent_start);
    }

    let side = Side::new(is_bull);
    let beyond = |a: f64, b: f64| side.beyond(a, b);
    let short_of = |a: f64, b: f64| side.short_of(a, b);

    let (origin, w3) = if is_bull {
        let w3 = arg_extreme(pivots, recent_start..end, beyond);
        (arg_extreme(pivots, recent_start..w3 + 1, short_of), w3)
    } else {
        let origin = arg_extreme(pivots, recent_start..end, short_of);
        (origin, arg_extreme(pivots, origin..end, beyond))
    };

    let w1 = if w3 <= origin + 2 {
        (origin + 1).min(w3)
    } else {
        first_swing_end(pivots, origin + 1..w3, side)
    };

    let w2 = arg_extreme(pivots, w1..w3 + 1, short_of);
    let w4 = if w3 + 1 >= end { w3 } else { arg_extreme(pivots, w3 + 1..end, short_of) };

    StructuralWaves { origin, w1, w2, w3, w4 }
}

/// Scan forward tracking the running extreme; stop at the first pullback past the threshold.
fn first_swing_end(pivots: &[Pivot], range: Range<usize>, side: Side) -> usize {
    let mut w1 = range.start;
    let mut extreme = pivots[w1].price;
    for i in range {
        let price = pivots[i].price;
        if side.beyond(price, extreme) {
            extreme = price;
            w1 = i;
        } else if side.pulled_back(price, extreme) {
            break;
        }
    }
    w1
}
