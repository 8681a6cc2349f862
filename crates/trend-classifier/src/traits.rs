//! Core traits for trend classification

use crate::types::{TrendMetrics, TrendSymbol};
use trend_core::Numeric;

/// Intrinsic properties of a trend analyzer
pub trait TrendAnalyzerProperties {
    /// Number of readings before the first non-training verdict
    fn minimum_samples(&self) -> usize;

    /// Get the name of the analysis method
    fn method_name(&self) -> &str;
}

/// Trait for online (one reading per period) trend classification
///
/// Online analyzers own their history. Each call consumes exactly one reading
/// and returns the verdict for the window ending at that reading.
pub trait OnlineTrendAnalyzer<T: Numeric>: TrendAnalyzerProperties {
    /// Add a new reading and classify the updated window
    fn observe(&mut self, value: T) -> TrendSymbol;

    /// Verdict from the most recent call (`Training` before any call)
    fn current_symbol(&self) -> TrendSymbol;

    /// Regression numbers behind the current verdict, if past warm-up
    fn current_metrics(&self) -> Option<TrendMetrics>;

    /// Feed a batch of readings, returning one verdict per reading
    fn observe_all<I>(&mut self, values: I) -> Vec<TrendSymbol>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        values.into_iter().map(|value| self.observe(value)).collect()
    }
}
