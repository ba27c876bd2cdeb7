//! # wavecount - Elliott-Wave style structure and projection
//!
//! Turns an ordered series of daily price bars into a structural wave count: the swing
//! pivots, the five anchors of the current impulse, a Fibonacci confidence score, the phase
//! the market currently sits in, and forward price targets with a simple trade setup.
//!
//! The whole pipeline is a pure function of its input. Nothing is cached between calls and
//! separate instruments can be analysed in parallel with [`analyze_parallel`].
//!
//! ## Quick Start
//!
//! ```rust
//! use wavecount::prelude::*;
//!
//! // Any type exposing open/high/low/close can be analysed
//! struct Bar { o: f64, h: f64, l: f64, c: f64 }
//!
//! impl OHLC for Bar {
//!     fn open(&self) -> f64 { self.o }
//!     fn high(&self) -> f64 { self.h }
//!     fn low(&self) -> f64 { self.l }
//!     fn close(&self) -> f64 { self.c }
//! }
//!
//! let analyzer = AnalyzerBuilder::new().depth(5).build().unwrap();
//!
//! let bars: Vec<Bar> = vec![];
//! match analyzer.analyze(&bars) {
//!     Ok(result) => println!("{}", summarize(&result)),
//!     Err(e) => println!("{}", e.reason()),
//! }
//! ```

pub mod params;
pub mod wave;

pub mod prelude {
    pub use crate::{
        // Entry points
        analyze,
        analyze_parallel,
        // Results
        AnalysisFailure,
        AnalysisReport,
        AnalysisResponse,
        AnalysisResult,
        // Engine
        AnalyzerBuilder,
        AnalyzerConfig,
        // Types
        Candle,
        OHLCExt,
        // Parameters
        params::{get_period, ParamMeta},
        Period,
        // Errors
        Result,
        WaveAnalyzer,
        WaveError,
        OHLC,
        // Stages
        wave::{
            build_trade_setup, classify_trend, find_pivots, identify_structure, locate_current_wave,
            project_waves, score_confidence, structural_points, summarize, ChartPoint, ConfidenceGrade,
            Pivot, PivotKind, ProjectionInput, StructuralWaves, TradeSetup, WaveProjection,
        },
    };
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use wave::*;

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, WaveError>;

/// Errors that can occur during wave analysis
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveError {
    #[error("insufficient price data: need {need} bars, got {got}")]
    InsufficientHistory { need: usize, got: usize },

    #[error("not enough swing points: need {need} pivots, got {got}")]
    InsufficientPivots { need: usize, got: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: &'static str },
}

impl WaveError {
    /// Short, stable reason suitable for `{ "error": reason }` payloads
    pub fn reason(&self) -> &'static str {
        match self {
            WaveError::InsufficientHistory { .. } => "insufficient price data",
            WaveError::InsufficientPivots { .. } => "not enough swing points",
            WaveError::InvalidValue(_) | WaveError::OutOfRange { .. } => "invalid parameter",
            WaveError::InvalidConfig(_) => "invalid configuration",
            WaveError::InvalidBar { .. } => "invalid price bar",
        }
    }

    /// `true` for the expected "need more data" conditions
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, WaveError::InsufficientHistory { .. } | WaveError::InsufficientPivots { .. })
    }
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Positive count (must be > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period(usize);

impl Period {
    /// Create a new Period, validating value is > 0
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(WaveError::InvalidValue("Period must be > 0"));
        }
        Ok(Self(value))
    }

    #[doc(hidden)]
    pub const fn new_const(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Period::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLC TRAITS
// ============================================================

/// Core price bar trait
pub trait OHLC {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;

    /// Date-like label carried through to pivots and chart points
    fn time(&self) -> &str {
        ""
    }
}

/// Extension trait with computed properties for price bars
pub trait OHLCExt: OHLC {
    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    /// Validate bar consistency
    fn validate(&self) -> Result<()> {
        let values = [self.open(), self.high(), self.low(), self.close()];
        if values.iter().any(|v| v.is_nan()) {
            return Err(WaveError::InvalidBar { index: 0, reason: "NaN in OHLC" });
        }
        if values.iter().any(|v| v.is_infinite()) {
            return Err(WaveError::InvalidBar { index: 0, reason: "Infinite value in OHLC" });
        }
        if values.iter().any(|&v| v < 0.0) {
            return Err(WaveError::InvalidBar { index: 0, reason: "negative price" });
        }
        if self.range() < 0.0 {
            return Err(WaveError::InvalidBar { index: 0, reason: "high < low" });
        }
        Ok(())
    }
}

impl<T: OHLC> OHLCExt for T {}

/// Daily price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time: time.into(), open, high, low, close }
    }
}

impl OHLC for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn time(&self) -> &str {
        &self.time
    }
}

// ============================================================
// ANALYSIS RESULT
// ============================================================

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Close of the last bar
    pub current_price: f64,
    pub is_bull: bool,
    pub current_wave: String,
    pub current_wave_label: String,
    /// Fibonacci rule score 0..=100
    pub confidence: u8,
    /// Origin and W1..W4, labelled "0".."4"
    pub structural_points: Vec<ChartPoint>,
    pub pivots: Vec<Pivot>,
    pub projections: Vec<WaveProjection>,
    pub trade_setup: TradeSetup,
    /// Origin price; a break beyond it falsifies the count
    pub invalidation_level: f64,
}

/// Serializable outcome: either the analysis or `{ "error": reason }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Analysis(Box<AnalysisResult>),
    Error { error: String },
}

impl From<Result<AnalysisResult>> for AnalysisResponse {
    fn from(result: Result<AnalysisResult>) -> Self {
        match result {
            Ok(analysis) => AnalysisResponse::Analysis(Box::new(analysis)),
            Err(e) => AnalysisResponse::Error { error: e.reason().to_owned() },
        }
    }
}

// ============================================================
// ANALYZER
// ============================================================

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Bars on each side needed to confirm a swing
    pub depth: Period,
    /// Most recent pivots searched for the structural anchors
    pub pivot_window: Period,
    pub projection_steps: Period,
    pub min_bars: Period,
    pub min_pivots: Period,
    /// Reject NaN/infinite/negative bars before analysing
    pub validate_data: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            depth: Period::new_const(5),
            pivot_window: Period::new_const(STRUCTURE_WINDOW),
            projection_steps: Period::new_const(DEFAULT_PROJECTION_STEPS),
            min_bars: Period::new_const(20),
            min_pivots: Period::new_const(5),
            validate_data: false,
        }
    }
}

/// Main analysis engine. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct WaveAnalyzer {
    config: AnalyzerConfig,
}

impl WaveAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the full pipeline over `bars` (ascending in time).
    pub fn analyze<T: OHLC>(&self, bars: &[T]) -> Result<AnalysisResult> {
        let min_bars = self.config.min_bars.get();
        if bars.len() < min_bars {
            debug!(bars = bars.len(), need = min_bars, "not enough bars to analyse");
            return Err(WaveError::InsufficientHistory { need: min_bars, got: bars.len() });
        }
        if self.config.validate_data {
            self.validate_bars(bars)?;
        }

        let pivots = find_pivots(bars, self.config.depth.get());
        let min_pivots = self.config.min_pivots.get();
        if pivots.len() < min_pivots {
            debug!(pivots = pivots.len(), need = min_pivots, "not enough swing points");
            return Err(WaveError::InsufficientPivots { need: min_pivots, got: pivots.len() });
        }

        let is_bull = classify_trend(&pivots);
        let waves = identify_structure_in_window(&pivots, is_bull, self.config.pivot_window.get());
        let confidence = score_confidence(&pivots);
        let (sim_i, phase) = current_phase(&pivots, &waves);
        debug!(
            pivots = pivots.len(),
            is_bull,
            ?waves,
            confidence,
            phase = phase.name,
            "wave structure identified"
        );

        let origin_price = pivots[waves.origin].price;
        let w1_len = measure_first_leg(&pivots, &waves);
        let current_price = bars[bars.len() - 1].close();

        let projections = project_waves(
            ProjectionInput::new(origin_price, w1_len, sim_i, is_bull, current_price)
                .steps(self.config.projection_steps.get()),
        );
        let trade_setup = build_trade_setup(current_price, origin_price, &projections);
        debug!(w1_len, projections = projections.len(), target = trade_setup.target, "projection complete");

        Ok(AnalysisResult {
            current_price,
            is_bull,
            current_wave: phase.name.to_owned(),
            current_wave_label: phase.label.to_owned(),
            confidence,
            structural_points: structural_points(&pivots, &waves),
            pivots,
            projections,
            trade_setup,
            invalidation_level: origin_price,
        })
    }

    fn validate_bars<T: OHLC>(&self, bars: &[T]) -> Result<()> {
        for (i, bar) in bars.iter().enumerate() {
            bar.validate().map_err(|e| match e {
                WaveError::InvalidBar { reason, .. } => {
                    debug!(index = i, reason, "rejecting invalid bar");
                    WaveError::InvalidBar { index: i, reason }
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Analyse `bars` with the default configuration.
pub fn analyze<T: OHLC>(bars: &[T]) -> Result<AnalysisResult> {
    WaveAnalyzer::default().analyze(bars)
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating WaveAnalyzer instances
#[derive(Debug, Clone, Default)]
pub struct AnalyzerBuilder {
    base: AnalyzerConfig,
    overrides: Vec<(&'static str, usize)>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.base = config;
        self
    }

    /// Bars on each side needed to confirm a swing
    pub fn depth(self, depth: usize) -> Self {
        self.set("depth", depth)
    }

    /// Number of most recent pivots searched for the structure
    pub fn pivot_window(self, window: usize) -> Self {
        self.set("pivot_window", window)
    }

    /// Number of forward phases to project
    pub fn projection_steps(self, steps: usize) -> Self {
        self.set("projection_steps", steps)
    }

    pub fn min_bars(self, bars: usize) -> Self {
        self.set("min_bars", bars)
    }

    pub fn min_pivots(self, pivots: usize) -> Self {
        self.set("min_pivots", pivots)
    }

    /// Enable/disable input validation
    pub fn validate_data(mut self, enable: bool) -> Self {
        self.base.validate_data = enable;
        self
    }

    fn set(mut self, name: &'static str, value: usize) -> Self {
        self.overrides.push((name, value));
        self
    }

    /// Build the analyzer, validating every parameter against its metadata
    pub fn build(self) -> Result<WaveAnalyzer> {
        let mut params = self.base.to_params();
        for (name, value) in self.overrides {
            params.insert(name, value as f64);
        }
        let mut config = AnalyzerConfig::with_params(&params)?;
        config.validate_data = self.base.validate_data;
        Ok(WaveAnalyzer::new(config))
    }
}

// ============================================================
// PARALLEL ANALYSIS
// ============================================================

use rayon::prelude::*;

/// Result of analysing a single instrument
#[derive(Debug)]
pub struct AnalysisReport {
    pub symbol: String,
    pub result: AnalysisResult,
}

/// Error from analysing a single instrument
#[derive(Debug)]
pub struct AnalysisFailure {
    pub symbol: String,
    pub error: WaveError,
}

/// Parallel analysis of multiple instruments
pub fn analyze_parallel<'a, T, I>(
    analyzer: &WaveAnalyzer,
    instruments: I,
) -> (Vec<AnalysisReport>, Vec<AnalysisFailure>)
where
    T: OHLC + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, bars)| {
            analyzer
                .analyze(bars)
                .map(|result| AnalysisReport { symbol: symbol.to_string(), result })
                .map_err(|error| AnalysisFailure { symbol: symbol.to_string(), error })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================
