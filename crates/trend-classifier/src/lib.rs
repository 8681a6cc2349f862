//! # Trend Classification
//!
//! This crate turns a stream of noisy readings into a discrete trend verdict.
//! A fixed window of the most recent readings is fitted with an ordinary
//! least-squares line, and a two-tailed Student's t-test on the slope decides
//! whether the signal is `Falling`, `Steady` or `Rising`. Before the window has
//! filled once, the verdict is `Training`.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same readings always give the same verdicts
//! - **Bounded cost**: O(capacity) work per reading, no allocation after warm-up
//! - **Configured critical value**: the t threshold is configuration, paired with
//!   the window capacity, never computed on the hot path
//! - **Visualizer hooks**: observe the window, fit and verdict without cost when unused
//!
//! ## Usage
//!
//! ```rust
//! use trend_classifier::{OnlineTrendAnalyzer, TrendClassifier, TrendParameters, TrendSymbol};
//!
//! let mut classifier = TrendClassifier::<f64>::new(TrendParameters::reference()).unwrap();
//! let verdicts = classifier.observe_all([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//!
//! assert_eq!(verdicts[4], TrendSymbol::Training);
//! assert_eq!(verdicts[5], TrendSymbol::Rising);
//! ```

pub mod classifier;
pub mod traits;
pub mod types;
pub mod visualization;

// Re-exports
pub use classifier::TrendClassifier;
pub use slope_test::{SlopeTest, SlopeTestOutcome};
pub use traits::{OnlineTrendAnalyzer, TrendAnalyzerProperties};
pub use types::{TrendMetrics, TrendParameters, TrendSymbol};
pub use visualization::{LoggingTrendVisualizer, NullTrendVisualizer, TrendVisualizer};
