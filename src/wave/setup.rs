//! Trade setup and chart overlay derived from an analysis

use serde::{Deserialize, Serialize};

use super::pivots::Pivot;
use super::projection::WaveProjection;
use super::structure::StructuralWaves;

/// Lower edge of the entry band relative to the current price
pub const ENTRY_LOW_FACTOR: f64 = 0.97;
/// Upper edge of the entry band relative to the current price
pub const ENTRY_HIGH_FACTOR: f64 = 1.01;
/// Target used when no major projection lies above the current price
pub const FALLBACK_TARGET_FACTOR: f64 = 1.15;

/// Entry band, stop and target for a long-side setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSetup {
    pub entry_low: f64,
    pub entry_high: f64,
    pub stop_loss: f64,
    pub target: f64,
}

/// Build a setup around `current_price`, stopped at the wave origin.
///
/// The target is the lowest major projection strictly above the current price, falling back to
/// a fixed 15% above it.
pub fn build_trade_setup(current_price: f64, origin_price: f64, projections: &[WaveProjection]) -> TradeSetup {
    let target = projections
        .iter()
        .filter(|p| p.is_major && p.target > current_price)
        .map(|p| p.target)
        .reduce(f64::min)
        .unwrap_or(current_price * FALLBACK_TARGET_FACTOR);

    TradeSetup {
        entry_low: current_price * ENTRY_LOW_FACTOR,
        entry_high: current_price * ENTRY_HIGH_FACTOR,
        stop_loss: origin_price,
        target,
    }
}

/// Labelled pivot for chart overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Candle index of the pivot
    pub index: usize,
    pub time: String,
    pub price: f64,
    pub label: String,
}

/// The five structural anchors as chart points labelled `"0"` to `"4"`.
///
/// Anchors outside the pivot slice are skipped.
pub fn structural_points(pivots: &[Pivot], waves: &StructuralWaves) -> Vec<ChartPoint> {
    waves
        .as_array()
        .iter()
        .enumerate()
        .filter_map(|(label, &at)| {
            let pivot = pivots.get(at)?;
            Some(ChartPoint {
                index: pivot.index,
                time: pivot.time.clone(),
                price: pivot.price,
                label: label.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::pivots::PivotKind;

    fn projection(target: f64, is_major: bool) -> WaveProjection {
        WaveProjection {
            step: 1,
            wave: String::new(),
            label: String::new(),
            fib_ratio: String::new(),
            target,
            pct_change: 0.0,
            is_major,
        }
    }

    #[test]
    fn test_entry_band_and_stop() {
        let setup = build_trade_setup(100.0, 80.0, &[]);
        assert!((setup.entry_low - 97.0).abs() < 1e-9);
        assert!((setup.entry_high - 101.0).abs() < 1e-9);
        assert_eq!(setup.stop_loss, 80.0);
        assert!((setup.target - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_major_above() {
        let p = [
            projection(130.0, true),
            projection(105.0, false),
            projection(112.0, true),
            projection(95.0, true),
        ];
        assert_eq!(build_trade_setup(100.0, 80.0, &p).target, 112.0);
    }

    #[test]
    fn test_structural_points_labels() {
        let pivots: Vec<Pivot> = (0..6)
            .map(|i| Pivot {
                index: i * 10,
                time: format!("day{i}"),
                price: 100.0 + i as f64,
                kind: if i % 2 == 0 { PivotKind::Low } else { PivotKind::High },
            })
            .collect();
        let waves = StructuralWaves { origin: 0, w1: 1, w2: 2, w3: 5, w4: 5 };
        let points = structural_points(&pivots, &waves);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["0", "1", "2", "3", "4"]);
        assert_eq!(points[3].index, 50);
        assert_eq!(points[3].time, "day5");
        assert_eq!(points[4].price, 105.0);
    }
}
