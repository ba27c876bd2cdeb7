//! Map the latest pivot onto a phase of the 9-phase cycle

use super::helpers::{wave_phase, WavePhase};
use super::pivots::Pivot;
use super::structure::StructuralWaves;

/// Phase index of the latest pivot relative to the structural anchors.
///
/// Only 0 (wave 1), 3 (wave 2), 4 (wave 3), 7 (wave 4) and 8 (wave 5) are produced.
pub fn locate_current_wave(pivots: &[Pivot], waves: &StructuralWaves) -> usize {
    let last = pivots.len().saturating_sub(1);
    match last {
        i if i <= waves.w1 => 0,
        i if i <= waves.w2 => 3,
        i if i <= waves.w3 => 4,
        i if i <= waves.w4 => 7,
        _ => 8,
    }
}

/// Phase index together with its table entry
pub fn current_phase(pivots: &[Pivot], waves: &StructuralWaves) -> (usize, &'static WavePhase) {
    let sim_i = locate_current_wave(pivots, waves);
    (sim_i, wave_phase(sim_i))
}
