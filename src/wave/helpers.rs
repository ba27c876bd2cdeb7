//! Fibonacci constants and phase tables shared across the wave stages
//!
//! The 9-phase cycle (1, 2a, 2b, 2, 3, 4a, 4b, 4, 5) is used both to name the phase the
//! market currently sits in and to label the forward projections.

// ============================================================
// FIBONACCI RATIOS
// ============================================================

/// Wave 2 retracement of wave 1
pub const FIB_0_618: f64 = 0.618;
/// Wave 3 extension of wave 1
pub const FIB_1_618: f64 = 1.618;
/// Wave 4 retracement of wave 3
pub const FIB_0_382: f64 = 0.382;
/// Shallow wave 4a retracement of wave 3
pub const FIB_0_236: f64 = 0.236;
/// Half retracement used by the 2b/4b sub-points
pub const FIB_0_500: f64 = 0.5;
/// Upper bound of a "normal" third wave; beyond it the first leg is re-derived from wave 3
pub const FIB_2_618: f64 = 2.618;

/// Number of phases in one motive or corrective cycle
pub const CYCLE_LEN: usize = 9;

// ============================================================
// CURRENT-PHASE TABLE
// ============================================================

/// Name and short label of one phase of the 9-phase cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePhase {
    pub name: &'static str,
    pub label: &'static str,
}

/// Phase names used to describe where the latest pivot sits
pub static WAVE_PHASES: [WavePhase; CYCLE_LEN] = [
    WavePhase { name: "Wave 1", label: "1" },
    WavePhase { name: "Wave 2A", label: "2A" },
    WavePhase { name: "Wave 2B", label: "2B" },
    WavePhase { name: "Wave 2C", label: "2C" },
    WavePhase { name: "Wave 3", label: "3" },
    WavePhase { name: "Wave 4A", label: "4A" },
    WavePhase { name: "Wave 4B", label: "4B" },
    WavePhase { name: "Wave 4C", label: "4C" },
    WavePhase { name: "Wave 5", label: "5" },
];

/// Look up a phase, wrapping indices past the end of the cycle.
#[inline]
pub fn wave_phase(sim_i: usize) -> &'static WavePhase {
    &WAVE_PHASES[sim_i % CYCLE_LEN]
}

// ============================================================
// PROJECTION LABEL TABLES
// ============================================================

/// Label entry for one projected step. An empty `name` means the step is not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLabel {
    pub name: &'static str,
    pub label: &'static str,
    pub fib_ratio: &'static str,
    pub is_major: bool,
}

const fn step(name: &'static str, label: &'static str, fib_ratio: &'static str, is_major: bool) -> StepLabel {
    StepLabel { name, label, fib_ratio, is_major }
}

const UNNAMED: StepLabel = step("", "", "", false);

/// Labels for even (impulse) cycles
pub static MOTIVE_STEPS: [StepLabel; CYCLE_LEN] = [
    step("Wave 1", "1", "1.000", true),
    step("Wave 2a", "2a", "0.382", false),
    step("Wave 2b", "2b", "0.500", false),
    step("Wave 2", "2", "0.618", true),
    step("Wave 3", "3", "1.618", true),
    step("Wave 4a", "4a", "0.236", false),
    step("Wave 4b", "4b", "0.500", false),
    step("Wave 4", "4", "0.382", true),
    step("Wave 5", "5", "1.000", true),
];

/// Labels for odd (corrective) cycles. Intrawave sub-points carry no name and are skipped.
pub static CORRECTIVE_STEPS: [StepLabel; CYCLE_LEN] = [
    step("Wave A", "A", "1.000", true),
    UNNAMED,
    UNNAMED,
    step("Wave B", "B", "0.618", true),
    step("Wave C", "C", "1.618", true),
    UNNAMED,
    UNNAMED,
    step("Wave X", "X", "0.382", true),
    step("Wave Y", "Y", "1.000", true),
];

/// Label for a position within a cycle of the given parity.
#[inline]
pub fn step_label(cycle_num: usize, curr_idx: usize) -> &'static StepLabel {
    if cycle_num % 2 == 0 {
        &MOTIVE_STEPS[curr_idx]
    } else {
        &CORRECTIVE_STEPS[curr_idx]
    }
}

/// `true` when `value` lies in the closed interval `[lo, hi]`
#[inline]
pub fn within(value: f64, lo: f64, hi: f64) -> bool {
    (lo..=hi).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_table_order() {
        assert_eq!(wave_phase(0).name, "Wave 1");
        assert_eq!(wave_phase(3).name, "Wave 2C");
        assert_eq!(wave_phase(4).name, "Wave 3");
        assert_eq!(wave_phase(7).name, "Wave 4C");
        assert_eq!(wave_phase(8).label, "5");
        assert_eq!(wave_phase(9).name, "Wave 1");
    }

    #[test]
    fn test_corrective_sub_points_unnamed() {
        for idx in [1, 2, 5, 6] {
            assert!(step_label(1, idx).name.is_empty());
            assert!(!step_label(0, idx).name.is_empty());
            assert!(!step_label(0, idx).is_major);
        }
        for idx in [0, 3, 4, 7, 8] {
            assert!(step_label(1, idx).is_major);
            assert!(step_label(2, idx).is_major);
            assert_eq!(step_label(1, idx).fib_ratio, step_label(0, idx).fib_ratio);
        }
    }

    #[test]
    fn test_within_inclusive() {
        assert!(within(0.382, 0.382, 0.786));
        assert!(within(0.786, 0.382, 0.786));
        assert!(!within(0.7861, 0.382, 0.786));
        assert!(!within(f64::NAN, 0.0, 1.0));
    }
}
