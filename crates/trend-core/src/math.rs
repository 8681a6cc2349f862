//! Mathematical utilities for trend classification
//!
//! This module provides the least-squares line fit used on every full window
//! and the Student's t critical values the slope test is configured with.

/// Ordinary least-squares regression of readings against their window index
pub mod regression {
    use crate::error::{Error, Result};

    /// Minimum number of points for a slope with a standard error (ν = n − 2 ≥ 1)
    pub const MIN_POINTS: usize = 3;

    /// Straight line of best fit through `(i, yᵢ)` for `i = 0..n`
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LinearFit {
        /// Fitted change per sample
        pub slope: f64,
        /// Fitted value at index 0 (the oldest sample)
        pub intercept: f64,
        /// Sum of squared residuals, Σ(y − ŷ)²
        pub sse: f64,
        /// Standard error of the slope estimate
        pub slope_std_error: f64,
        /// Number of points fitted
        pub n: usize,
    }

    impl LinearFit {
        /// Fit a line to `values`, using each value's position as `x`.
        ///
        /// Sums are taken about the means (`Sxy / Sxx`), which is algebraically
        /// the same as `(Σx·Σy − n·Σxy) / ((Σx)² − n·Σx²)` but keeps a flat
        /// window exactly flat in floating point.
        ///
        /// The readings are first divided by a power of two near their largest
        /// magnitude. That division is exact, so ordinary windows fit to the
        /// same bits, and readings up to ~1e300 fit without overflow. `sse` is
        /// reported in reading units squared and saturates to +∞ once that
        /// square leaves the `f64` range; slope, intercept and standard error
        /// stay finite.
        pub fn against_index(values: &[f64]) -> Result<Self> {
            let n = values.len();
            if n < MIN_POINTS {
                return Err(Error::InsufficientData {
                    expected: MIN_POINTS,
                    actual: n,
                });
            }

            let scale = power_of_two_scale(values.iter().fold(0.0, |m: f64, y| m.max(y.abs())));

            let nf = n as f64;
            let mean_x = (nf - 1.0) / 2.0;
            let mean_z = values.iter().map(|y| y / scale).sum::<f64>() / nf;

            let mut sxx = 0.0;
            let mut sxz = 0.0;
            for (i, &y) in values.iter().enumerate() {
                let dx = i as f64 - mean_x;
                sxx += dx * dx;
                sxz += dx * (y / scale - mean_z);
            }

            // x is 0..n with n >= 3, so Sxx > 0
            let slope_z = sxz / sxx;
            let intercept_z = mean_z - slope_z * mean_x;

            let sse_z = values
                .iter()
                .enumerate()
                .map(|(i, &y)| {
                    let residual = y / scale - (intercept_z + slope_z * i as f64);
                    residual * residual
                })
                .sum::<f64>();

            let std_error_z = (sse_z / (nf - 2.0)).sqrt() / sxx.sqrt();

            let slope = slope_z * scale;
            let slope_std_error = std_error_z * scale;
            if !slope.is_finite() || !slope_std_error.is_finite() {
                return Err(Error::Computation(
                    "regression over non-finite readings".to_string(),
                ));
            }

            Ok(Self {
                slope,
                intercept: intercept_z * scale,
                sse: sse_z * scale * scale,
                slope_std_error,
                n,
            })
        }

        /// Degrees of freedom of the slope test
        pub fn degrees_of_freedom(&self) -> usize {
            self.n - 2
        }

        /// `|slope / stderr|`, the statistic for H0: slope = 0.
        ///
        /// A perfect flat fit (0/0) gives 0; a perfect sloped fit gives +∞.
        pub fn t_statistic(&self) -> f64 {
            if self.slope_std_error == 0.0 {
                if self.slope == 0.0 {
                    0.0
                } else {
                    f64::INFINITY
                }
            } else {
                (self.slope / self.slope_std_error).abs()
            }
        }

        /// Value of the fitted line at window index `x`
        pub fn predict(&self, x: f64) -> f64 {
            self.intercept + self.slope * x
        }
    }

    /// Power of two at or just below `magnitude` (1 for zero or non-finite input)
    fn power_of_two_scale(magnitude: f64) -> f64 {
        if magnitude == 0.0 || !magnitude.is_finite() {
            return 1.0;
        }
        let exponent = magnitude.log2().floor().clamp(-1000.0, 1000.0) as i32;
        2f64.powi(exponent)
    }

}

/// Distribution-related mathematical functions
pub mod distributions {
    /// Student's t distribution utilities
    pub mod student_t {
        use crate::error::{Error, Result};
        use statrs::distribution::{ContinuousCDF, StudentsT};

        /// Two-tailed critical values at α = 0.05, indexed by ν − 1 (ν = 1..=30)
        pub const TWO_TAILED_ALPHA_05: [f64; 30] = [
            12.706204736,
            4.302652730,
            3.182446305,
            2.776445105,
            2.570581836,
            2.446911851,
            2.364624252,
            2.306004135,
            2.262157163,
            2.228138852,
            2.200985160,
            2.178812830,
            2.160368656,
            2.144786688,
            2.131449546,
            2.119905299,
            2.109815578,
            2.100922040,
            2.093024054,
            2.085963447,
            2.079613845,
            2.073873068,
            2.068657610,
            2.063898562,
            2.059538553,
            2.055529439,
            2.051830516,
            2.048407142,
            2.045229642,
            2.042272456,
        ];

        /// Table lookup of the α = 0.05 two-tailed critical value
        pub fn table_critical_value(degrees_of_freedom: usize) -> Option<f64> {
            degrees_of_freedom
                .checked_sub(1)
                .and_then(|idx| TWO_TAILED_ALPHA_05.get(idx))
                .copied()
        }

        /// Two-tailed critical value `|invt(α/2, ν)|` from the t distribution.
        ///
        /// Meant for configuration time; the classifier only ever sees the result.
        pub fn two_tailed_critical_value(alpha: f64, degrees_of_freedom: usize) -> Result<f64> {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "significance level {alpha} must be in (0, 1)"
                )));
            }
            if degrees_of_freedom == 0 {
                return Err(Error::InvalidParameter(
                    "degrees of freedom must be at least 1".to_string(),
                ));
            }

            let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64).map_err(|e| {
                Error::Computation(format!("Failed to create t-distribution: {e}"))
            })?;
            Ok(t_dist.inverse_cdf(1.0 - alpha / 2.0).abs())
        }

    }
}
