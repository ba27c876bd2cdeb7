//! Wave analysis stages
//!
//! Each stage is a pure function over the previous stage's output:
//!
//! 1. [`find_pivots`] - swing highs/lows merged into an alternating ZigZag
//! 2. [`classify_trend`] - bullish/bearish from pivot slope
//! 3. [`identify_structure`] - origin and W1..W4 anchors in the recent pivot window
//! 4. [`score_confidence`] - Fibonacci rule score of the last four legs
//! 5. [`locate_current_wave`] - phase of the latest pivot in the 9-phase cycle
//! 6. [`project_waves`] - forward targets over alternating motive/corrective cycles
//!
//! [`build_trade_setup`] and [`structural_points`] package the result for callers.

pub mod helpers;

pub mod confidence;
pub mod locator;
pub mod narrative;
pub mod pivots;
pub mod projection;
pub mod setup;
pub mod structure;
pub mod trend;

pub use confidence::*;
pub use helpers::*;
pub use locator::*;
pub use narrative::summarize;
pub use pivots::*;
pub use projection::*;
pub use setup::*;
pub use structure::*;
pub use trend::*;
