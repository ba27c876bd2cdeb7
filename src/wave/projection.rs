//! Forward wave projection
//!
//! Targets are generated by walking forward from the current phase through repeated 9-phase
//! cycles. Even cycles are motive (1-2-3-4-5) in the trend direction, odd cycles corrective
//! (A-B-C-X-Y) against it. Each odd cycle starts from the end of one full impulse and retraces
//! it completely, so displacement never accumulates beyond one net cycle.

use serde::{Deserialize, Serialize};

use super::helpers::{
    step_label, CYCLE_LEN, FIB_0_236, FIB_0_382, FIB_0_500, FIB_0_618, FIB_1_618, FIB_2_618,
};
use super::pivots::Pivot;
use super::structure::StructuralWaves;

/// Lowest price a projected target may take
pub const MIN_TARGET: f64 = 0.01;
/// Steps projected by the analyzer
pub const DEFAULT_PROJECTION_STEPS: usize = 12;
/// First-leg lengths below this are treated as degenerate
pub const MIN_FIRST_LEG: f64 = 0.001;

/// One projected price target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveProjection {
    /// Position in the forward walk, `1..=num_steps`
    pub step: usize,
    pub wave: String,
    pub label: String,
    pub fib_ratio: String,
    pub target: f64,
    /// Move from the current price to `target`, in percent
    pub pct_change: f64,
    pub is_major: bool,
}

/// Inputs of [`project_waves`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub origin_price: f64,
    /// Measured length of the first leg
    pub w1_len: f64,
    /// Current phase index (see [`crate::wave::locate_current_wave`])
    pub sim_i: usize,
    pub is_bull: bool,
    pub current_price: f64,
    pub num_steps: usize,
}

impl ProjectionInput {
    pub fn new(origin_price: f64, w1_len: f64, sim_i: usize, is_bull: bool, current_price: f64) -> Self {
        Self {
            origin_price,
            w1_len,
            sim_i,
            is_bull,
            current_price,
            num_steps: DEFAULT_PROJECTION_STEPS,
        }
    }

    pub fn steps(mut self, num_steps: usize) -> Self {
        self.num_steps = num_steps;
        self
    }
}

/// Leg lengths of one impulse derived from the first leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseLegs {
    pub len1: f64,
    pub len2: f64,
    pub len3: f64,
    pub len4: f64,
    pub len5: f64,
}

impl BaseLegs {
    pub fn from_first_leg(w1_len: f64) -> Self {
        let len3 = FIB_1_618 * w1_len;
        Self {
            len1: w1_len,
            len2: FIB_0_618 * w1_len,
            len3,
            len4: FIB_0_382 * len3,
            len5: w1_len,
        }
    }

    /// Net displacement of a complete 1-5 sequence, unsigned
    pub fn net(&self) -> f64 {
        self.len1 - self.len2 + self.len3 - self.len4 + self.len5
    }

    /// Offsets of the nine points of a cycle relative to its start, moving in `dir`.
    pub fn cycle_offsets(&self, dir: f64) -> [f64; CYCLE_LEN] {
        let cw1 = dir * self.len1;
        let cw2a = cw1 - dir * self.len1 * FIB_0_382;
        let cw2b = cw1 - dir * self.len1 * FIB_0_500;
        let cw2 = cw1 - dir * self.len2;
        let cw3 = cw2 + dir * self.len3;
        let cw4a = cw3 - dir * self.len3 * FIB_0_236;
        let cw4b = cw3 - dir * self.len3 * FIB_0_500;
        let cw4 = cw3 - dir * self.len4;
        let cw5 = cw4 + dir * self.len5;
        [cw1, cw2a, cw2b, cw2, cw3, cw4a, cw4b, cw4, cw5]
    }
}

/// Length of the first leg used to scale the projection.
///
/// Measured origin to W1. When the W2 to W3 leg is longer than 2.618 times that, the third
/// wave is treated as extended and the first leg is re-derived as `w3_leg / 1.618`. A
/// degenerate result falls back to the distance between the last two pivots.
pub fn measure_first_leg(pivots: &[Pivot], waves: &StructuralWaves) -> f64 {
    let price = |i: usize| pivots.get(i).map_or(0.0, |p| p.price);

    let mut w1_len = (price(waves.w1) - price(waves.origin)).abs();
    let w3_leg = (price(waves.w3) - price(waves.w2)).abs();
    if w3_leg > FIB_2_618 * w1_len {
        w1_len = w3_leg / FIB_1_618;
    }
    if w1_len < MIN_FIRST_LEG {
        if let [.., prev, last] = pivots {
            w1_len = (last.price - prev.price).abs();
        }
    }
    w1_len
}

/// Generate up to `num_steps` forward targets starting after phase `sim_i`.
///
/// Steps landing on an unnamed corrective sub-point are skipped, so the result can be shorter
/// than `num_steps`; `step` keeps its position in the walk.
pub fn project_waves(input: ProjectionInput) -> Vec<WaveProjection> {
    let legs = BaseLegs::from_first_leg(input.w1_len);
    let trend_sign = if input.is_bull { 1.0 } else { -1.0 };
    let cycle0_net = trend_sign * legs.net();

    let mut projections = Vec::with_capacity(input.num_steps);
    for s in 1..=input.num_steps {
        let eff_abs_idx = input.sim_i + s;
        let cycle_num = eff_abs_idx / CYCLE_LEN;
        let curr_idx = eff_abs_idx % CYCLE_LEN;

        let entry = step_label(cycle_num, curr_idx);
        if entry.name.is_empty() {
            continue;
        }

        let odd_cycle = cycle_num % 2 == 1;
        let cycle_sign = if odd_cycle { -1.0 } else { 1.0 };
        let prior_cycles_move = if odd_cycle { cycle0_net } else { 0.0 };
        let rel_tp = legs.cycle_offsets(trend_sign * cycle_sign)[curr_idx];

        let target = (input.origin_price + prior_cycles_move + rel_tp).max(MIN_TARGET);
        projections.push(WaveProjection {
            step: s,
            wave: entry.name.to_owned(),
            label: entry.label.to_owned(),
            fib_ratio: entry.fib_ratio.to_owned(),
            target,
            pct_change: pct_change(target, input.current_price),
            is_major: entry.is_major,
        });
    }
    projections
}

/// Percent move from `from` to `to`; zero when `from` is zero.
#[inline]
pub fn pct_change(to: f64, from: f64) -> f64 {
    if from == 0.0 {
        0.0
    } else {
        (to - from) / from * 100.0
    }
}
