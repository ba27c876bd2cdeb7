//! Parameter metadata for the analyzer
//!
//! This module describes the tunable analyzer parameters, enabling:
//! - Grid search over swing depth and window sizes
//! - Parameter documentation
//! - Building a configuration from loosely typed key/value input
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use wavecount::prelude::*;
//!
//! for param in AnalyzerConfig::param_meta() {
//!     println!("{}: default {} ({})", param.name, param.default, param.description);
//! }
//!
//! let mut params = HashMap::new();
//! params.insert("depth", 3.0);
//! let config = AnalyzerConfig::with_params(&params).unwrap();
//! assert_eq!(config.depth.get(), 3);
//! ```

use std::collections::HashMap;

use crate::{AnalyzerConfig, Period, Result, WaveError};

// ============================================================
// PARAMETER METADATA
// ============================================================

/// Metadata for a single analyzer parameter. All parameters are positive counts.
#[derive(Debug, Clone)]
pub struct ParamMeta {
  /// Parameter name (e.g., "depth")
  pub name: &'static str,
  /// Default value
  pub default: f64,
  /// Range for optimization: (min, max, step)
  pub range: (f64, f64, f64),
  /// Human-readable description
  pub description: &'static str,
}

impl ParamMeta {
  pub const fn count(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, default, range, description }
  }

  /// Generate all values for grid search
  pub fn generate_grid(&self) -> Vec<f64> {
    let (min, max, step) = self.range;
    let mut values = Vec::new();
    let mut v = min;
    while v <= max + f64::EPSILON {
      values.push(v);
      v += step;
    }
    values
  }

  /// Validate a value for this parameter
  pub fn validate(&self, value: f64) -> Result<()> {
    let (min, max, _) = self.range;
    if value.is_nan() || value < min || value > max {
      return Err(WaveError::OutOfRange { field: self.name, value, min, max });
    }
    if value < 1.0 || value.fract() != 0.0 {
      return Err(WaveError::InvalidValue("count parameters must be positive integers"));
    }
    Ok(())
  }
}

static ANALYZER_PARAMS: [ParamMeta; 5] = [
  ParamMeta::count("depth", 5.0, (1.0, 50.0, 1.0), "Bars required on each side to confirm a swing"),
  ParamMeta::count("pivot_window", 20.0, (3.0, 200.0, 1.0), "Most recent pivots searched for the structure"),
  ParamMeta::count("projection_steps", 12.0, (1.0, 90.0, 1.0), "Forward phases walked by the projector"),
  ParamMeta::count("min_bars", 20.0, (1.0, 100_000.0, 1.0), "Bars required before analysing"),
  ParamMeta::count("min_pivots", 5.0, (1.0, 1_000.0, 1.0), "Swing points required before analysing"),
];

impl AnalyzerConfig {
  /// Returns metadata for all configurable parameters
  pub fn param_meta() -> &'static [ParamMeta] {
    &ANALYZER_PARAMS
  }

  /// Creates a configuration from a key/value map.
  ///
  /// Missing parameters use their default values; unknown keys are rejected.
  pub fn with_params(params: &HashMap<&str, f64>) -> Result<Self> {
    if let Some(unknown) = params.keys().find(|k| !ANALYZER_PARAMS.iter().any(|m| m.name == **k)) {
      return Err(WaveError::InvalidConfig(format!("unknown parameter `{unknown}`")));
    }
    for meta in &ANALYZER_PARAMS {
      if let Some(&value) = params.get(meta.name) {
        meta.validate(value)?;
      }
    }
    Ok(Self {
      depth: get_period(params, "depth", 5)?,
      pivot_window: get_period(params, "pivot_window", 20)?,
      projection_steps: get_period(params, "projection_steps", 12)?,
      min_bars: get_period(params, "min_bars", 20)?,
      min_pivots: get_period(params, "min_pivots", 5)?,
      validate_data: false,
    })
  }

  /// Current values keyed by parameter name
  pub fn to_params(&self) -> HashMap<&'static str, f64> {
    HashMap::from([
      ("depth", self.depth.get() as f64),
      ("pivot_window", self.pivot_window.get() as f64),
      ("projection_steps", self.projection_steps.get() as f64),
      ("min_bars", self.min_bars.get() as f64),
      ("min_pivots", self.min_pivots.get() as f64),
    ])
  }
}

// ============================================================
// PARAMETER VALUE HELPERS
// ============================================================

/// Helper to get a Period from params with default fallback
pub fn get_period(params: &HashMap<&str, f64>, key: &str, default: usize) -> Result<Period> {
  let value = params.get(key).copied().unwrap_or(default as f64);
  Period::new(value as usize)
}

// ============================================================
// TESTS
// ============================================================
