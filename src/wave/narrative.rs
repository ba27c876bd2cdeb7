//! Plain-text summary of an analysis result

use super::confidence::ConfidenceGrade;
use crate::AnalysisResult;

/// Render a short prose summary of `result`.
pub fn summarize(result: &AnalysisResult) -> String {
    let bias = if result.is_bull { "bullish" } else { "bearish" };
    let grade = ConfidenceGrade::from_score(result.confidence);

    let mut out = format!(
        "Trend is {bias}; price {:.2} is in {} with {} confidence ({}/100).",
        result.current_price,
        result.current_wave,
        grade.as_str(),
        result.confidence,
    );

    if let Some(next) = result.projections.iter().find(|p| p.is_major) {
        out.push_str(&format!(
            " Next major target: {} at {:.2} ({:+.2}%).",
            next.wave, next.target, next.pct_change
        ));
    }
    out.push_str(&format!(" The count is invalidated beyond {:.2}.", result.invalidation_level));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{TradeSetup, WaveProjection};

    fn result() -> AnalysisResult {
        AnalysisResult {
            current_price: 110.0,
            is_bull: true,
            current_wave: "Wave 3".to_owned(),
            current_wave_label: "3".to_owned(),
            confidence: 75,
            structural_points: Vec::new(),
            pivots: Vec::new(),
            projections: vec![
                WaveProjection {
                    step: 1,
                    wave: "Wave 4a".to_owned(),
                    label: "4a".to_owned(),
                    fib_ratio: "0.236".to_owned(),
                    target: 105.0,
                    pct_change: -4.545,
                    is_major: false,
                },
                WaveProjection {
                    step: 3,
                    wave: "Wave 4".to_owned(),
                    label: "4".to_owned(),
                    fib_ratio: "0.382".to_owned(),
                    target: 101.0,
                    pct_change: -8.18,
                    is_major: true,
                },
            ],
            trade_setup: TradeSetup { entry_low: 106.7, entry_high: 111.1, stop_loss: 90.0, target: 126.5 },
            invalidation_level: 90.0,
        }
    }

    #[test]
    fn test_summary_text() {
        let text = summarize(&result());
        assert_eq!(
            text,
            "Trend is bullish; price 110.00 is in Wave 3 with high confidence (75/100). \
             Next major target: Wave 4 at 101.00 (-8.18%). The count is invalidated beyond 90.00."
        );
    }

    #[test]
    fn test_summary_without_projections() {
        let mut r = result();
        r.projections.clear();
        r.is_bull = false;
        r.confidence = 10;
        let text = summarize(&r);
        assert!(text.starts_with("Trend is bearish"));
        assert!(text.contains("low confidence"));
        assert!(!text.contains("Next major target"));
    }
}
