//! Online trend classification over a sliding window

use crate::slope_test::SlopeTest;
use crate::traits::{OnlineTrendAnalyzer, TrendAnalyzerProperties};
use crate::types::{TrendMetrics, TrendParameters, TrendSymbol};
use crate::visualization::{NullTrendVisualizer, TrendVisualizer};
use trend_core::{LinearFit, Numeric, Result, SampleWindow};

/// Trend classifier that fits a line to the last `capacity` readings
///
/// Each reading is pushed into a bounded window. Until the window has been
/// filled once the classifier answers `Training`. From then on every call fits
/// an ordinary least-squares line against the reading's position in the
/// window and runs a two-tailed t-test on the slope.
///
/// # Type Parameters
///
/// - `T`: The reading type
/// - `V`: The visualizer type that implements `TrendVisualizer`
#[derive(Debug, Clone)]
pub struct TrendClassifier<T: Numeric, V: TrendVisualizer<T> = NullTrendVisualizer<T>> {
    params: TrendParameters,
    window: SampleWindow<T>,
    test: SlopeTest,
    current_symbol: TrendSymbol,
    current_metrics: Option<TrendMetrics>,
    // Reused f64 copy of the window
    scratch: Vec<f64>,
    visualizer: V,
}

impl<T: Numeric> TrendClassifier<T, NullTrendVisualizer<T>> {
    /// Create a new classifier with null visualizer
    pub fn new(params: TrendParameters) -> Result<Self> {
        Self::with_visualizer(NullTrendVisualizer::new(), params)
    }

    /// Six-sample window at α = 0.05
    pub fn reference() -> Result<Self> {
        Self::new(TrendParameters::reference())
    }
}

impl<T: Numeric, V: TrendVisualizer<T>> TrendClassifier<T, V> {
    /// Create a new classifier with custom visualizer
    pub fn with_visualizer(visualizer: V, params: TrendParameters) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            window: SampleWindow::new(params.capacity)?,
            test: SlopeTest::new(params.critical_t_value),
            current_symbol: TrendSymbol::Training,
            current_metrics: None,
            scratch: Vec::with_capacity(params.capacity),
            params,
            visualizer,
        })
    }

    pub fn parameters(&self) -> &TrendParameters {
        &self.params
    }

    /// The readings currently under analysis
    pub fn window(&self) -> &SampleWindow<T> {
        &self.window
    }

    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    /// Total readings observed so far (saturating)
    pub fn observation_count(&self) -> usize {
        self.window.total_observed()
    }

    /// True once warm-up is over; never reverts
    pub fn is_trained(&self) -> bool {
        self.window.is_full()
    }

    fn classify_window(&mut self) -> TrendSymbol {
        self.scratch.clear();
        self.scratch.extend(self.window.values().map(|v| v.to_f64()));

        match LinearFit::against_index(&self.scratch) {
            Ok(fit) => {
                let (outcome, metrics) = self.test.evaluate_with_metrics(&fit);
                log::debug!(
                    "t_observed={:.4} t_critical={:.4} slope={:.4} -> {}",
                    outcome.t_observed,
                    self.test.critical_t_value(),
                    fit.slope,
                    outcome.symbol
                );
                report(self.visualizer.record_fit(&self.scratch, &metrics));
                self.current_metrics = Some(metrics);
                outcome.symbol
            }
            Err(e) => {
                // Non-finite readings are outside the contract; no evidence of a slope
                log::warn!("Regression over {:?} failed: {e}", self.scratch);
                self.current_metrics = None;
                TrendSymbol::Steady
            }
        }
    }
}

impl<T: Numeric, V: TrendVisualizer<T>> TrendAnalyzerProperties for TrendClassifier<T, V> {
    fn minimum_samples(&self) -> usize {
        self.params.capacity
    }

    fn method_name(&self) -> &str {
        "OLS slope t-test"
    }
}

impl<T: Numeric, V: TrendVisualizer<T>> OnlineTrendAnalyzer<T> for TrendClassifier<T, V> {
    fn observe(&mut self, value: T) -> TrendSymbol {
        self.window.push(value);
        report(self.visualizer.record_observation(value, self.window.len()));

        let symbol = if self.window.is_full() {
            self.classify_window()
        } else {
            log::trace!(
                "Training: {}/{} readings",
                self.window.len(),
                self.params.capacity
            );
            TrendSymbol::Training
        };

        self.current_symbol = symbol;
        report(self.visualizer.record_verdict(symbol));
        symbol
    }

    fn current_symbol(&self) -> TrendSymbol {
        self.current_symbol
    }

    fn current_metrics(&self) -> Option<TrendMetrics> {
        self.current_metrics
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        log::warn!("Trend visualizer failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Mutex;
    use trend_core::Error;

    #[test]
    fn test_rejects_small_capacity() {
        let params = TrendParameters {
            capacity: 2,
            ..Default::default()
        };
        assert!(matches!(
            TrendClassifier::<f64>::new(params),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_step_down_scenario() {
        let mut classifier = TrendClassifier::<f64>::reference().unwrap();
        let symbols = classifier.observe_all([5.0, 5.0, 5.0, 5.0, 5.0, 4.0]);

        assert_eq!(&symbols[..5], &[TrendSymbol::Training; 5]);
        assert_eq!(symbols[5], TrendSymbol::Steady);

        let metrics = classifier.current_metrics().unwrap();
        assert_relative_eq!(metrics.slope, -1.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.t_observed, 3.0f64.sqrt(), epsilon = 1e-9);
        assert_eq!(metrics.sample_count, 6);
    }

    #[test]
    fn test_metrics_absent_during_training() {
        let mut classifier = TrendClassifier::<f64>::reference().unwrap();
        assert_eq!(classifier.current_symbol(), TrendSymbol::Training);
        classifier.observe(1.0);
        assert!(classifier.current_metrics().is_none());
        assert!(!classifier.is_trained());
        assert_eq!(classifier.observation_count(), 1);
    }

    #[test]
    fn test_non_finite_reading_reports_steady() {
        let mut classifier =
            TrendClassifier::<f64>::new(TrendParameters::for_capacity(3).unwrap()).unwrap();
        classifier.observe(1.0);
        classifier.observe(f64::NAN);
        assert_eq!(classifier.observe(3.0), TrendSymbol::Steady);
        assert!(classifier.current_metrics().is_none());
    }

    #[derive(Default)]
    struct CountingVisualizer {
        observations: Mutex<usize>,
        fits: Mutex<usize>,
        verdicts: Mutex<Vec<TrendSymbol>>,
    }

    impl TrendVisualizer<f64> for CountingVisualizer {
        fn record_observation(&self, _value: f64, _window_len: usize) -> Result<()> {
            *self.observations.lock().unwrap() += 1;
            Ok(())
        }

        fn record_fit(&self, window: &[f64], _metrics: &TrendMetrics) -> Result<()> {
            assert_eq!(window.len(), 4);
            *self.fits.lock().unwrap() += 1;
            Ok(())
        }

        fn record_verdict(&self, symbol: TrendSymbol) -> Result<()> {
            self.verdicts.lock().unwrap().push(symbol);
            Ok(())
        }
    }

    #[test]
    fn test_visualizer_sees_every_stage() {
        let params = TrendParameters::for_capacity(4).unwrap();
        let mut classifier =
            TrendClassifier::<f64, _>::with_visualizer(CountingVisualizer::default(), params).unwrap();

        classifier.observe_all([1.0, 2.0, 3.0, 4.0, 5.0]);

        let visualizer = classifier.visualizer();
        assert_eq!(*visualizer.observations.lock().unwrap(), 5);
        assert_eq!(*visualizer.fits.lock().unwrap(), 2);
        assert_eq!(
            *visualizer.verdicts.lock().unwrap(),
            vec![
                TrendSymbol::Training,
                TrendSymbol::Training,
                TrendSymbol::Training,
                TrendSymbol::Rising,
                TrendSymbol::Rising,
            ]
        );
    }
}
