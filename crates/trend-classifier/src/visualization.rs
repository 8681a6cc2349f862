//! Visualization interface for trend classification
//!
//! The classifier calls these hooks while it works so that callers can record
//! or display the window, the fitted line and the verdict without the
//! classifier knowing where that data goes.

use crate::types::{TrendMetrics, TrendSymbol};
use std::marker::PhantomData;
use trend_core::{Numeric, Result};

/// Trait for observing the stages of each `observe` call
///
/// # Example Implementation
///
/// ```rust,ignore
/// use trend_classifier::{TrendClassifier, TrendParameters};
/// use trend_classifier::visualization::LoggingTrendVisualizer;
///
/// let classifier = TrendClassifier::<f64, _>::with_visualizer(
///     LoggingTrendVisualizer::new(log::Level::Info),
///     TrendParameters::reference(),
/// )?;
/// ```
pub trait TrendVisualizer<T: Numeric>: Send + Sync {
    /// Record a reading as it enters the window
    fn record_observation(&self, value: T, window_len: usize) -> Result<()>;

    /// Record the regression over a full window
    fn record_fit(&self, window: &[f64], metrics: &TrendMetrics) -> Result<()>;

    /// Record the verdict returned to the caller
    fn record_verdict(&self, symbol: TrendSymbol) -> Result<()>;
}

/// Visualizer that discards everything
#[derive(Debug, Clone, Copy)]
pub struct NullTrendVisualizer<T: Numeric> {
    _phantom: PhantomData<T>,
}

impl<T: Numeric> NullTrendVisualizer<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: Numeric> Default for NullTrendVisualizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> TrendVisualizer<T> for NullTrendVisualizer<T> {
    #[inline]
    fn record_observation(&self, _value: T, _window_len: usize) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn record_fit(&self, _window: &[f64], _metrics: &TrendMetrics) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn record_verdict(&self, _symbol: TrendSymbol) -> Result<()> {
        Ok(())
    }
}

/// Visualizer that writes each stage to the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LoggingTrendVisualizer {
    level: log::Level,
}

impl LoggingTrendVisualizer {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingTrendVisualizer {
    fn default() -> Self {
        Self::new(log::Level::Debug)
    }
}

impl<T: Numeric> TrendVisualizer<T> for LoggingTrendVisualizer {
    fn record_observation(&self, value: T, window_len: usize) -> Result<()> {
        log::trace!("Reading {value:?} entered window ({window_len} held)");
        Ok(())
    }

    fn record_fit(&self, window: &[f64], metrics: &TrendMetrics) -> Result<()> {
        log::log!(self.level, "Window {window:?}: {metrics}");
        Ok(())
    }

    fn record_verdict(&self, symbol: TrendSymbol) -> Result<()> {
        log::log!(self.level, "Trend key {}: {symbol}", symbol.key());
        Ok(())
    }
}
