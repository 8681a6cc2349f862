//! Common types used in trend classification

use serde::{Deserialize, Serialize};
use std::fmt;
use trend_core::math::regression::MIN_POINTS;
use trend_core::{student_t, Error, Result};

/// The trend verdict for the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrendSymbol {
    /// Window not yet full, no judgement possible
    Training,

    /// Slope significantly below zero
    Falling,

    /// No evidence the slope differs from zero
    Steady,

    /// Slope significantly above zero
    Rising,
}

impl TrendSymbol {
    /// Numeric key used in telemetry lines (0 = training .. 3 = rising)
    pub fn key(self) -> u8 {
        match self {
            TrendSymbol::Training => 0,
            TrendSymbol::Falling => 1,
            TrendSymbol::Steady => 2,
            TrendSymbol::Rising => 3,
        }
    }

    /// Inverse of [`TrendSymbol::key`]
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            0 => Some(TrendSymbol::Training),
            1 => Some(TrendSymbol::Falling),
            2 => Some(TrendSymbol::Steady),
            3 => Some(TrendSymbol::Rising),
            _ => None,
        }
    }

    /// True for any verdict produced after warm-up
    pub fn is_trained(self) -> bool {
        self != TrendSymbol::Training
    }
}

impl fmt::Display for TrendSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSymbol::Training => write!(f, "Training"),
            TrendSymbol::Falling => write!(f, "Falling"),
            TrendSymbol::Steady => write!(f, "Steady"),
            TrendSymbol::Rising => write!(f, "Rising"),
        }
    }
}

/// Parameters for trend classification
///
/// `capacity` and `critical_t_value` are coupled: the critical value is the
/// two-tailed Student's t threshold for ν = `capacity - 2` at
/// `significance_level`. Change one, recompute the other. When a document
/// leaves `critical_t_value` out, deserialization derives it from the other
/// two fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TrendParametersDocument")]
pub struct TrendParameters {
    /// Number of readings in the regression window
    pub capacity: usize,

    /// |t| above which the slope is declared non-zero
    pub critical_t_value: f64,

    /// Significance level the critical value was derived for
    pub significance_level: f64,
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self {
            capacity: 6,
            critical_t_value: 2.776445105, // invt(0.025, 4)
            significance_level: 0.05,
        }
    }
}

/// `TrendParameters` as written in a config document, every field optional
#[derive(Deserialize)]
struct TrendParametersDocument {
    capacity: Option<usize>,
    critical_t_value: Option<f64>,
    significance_level: Option<f64>,
}

impl From<TrendParametersDocument> for TrendParameters {
    fn from(doc: TrendParametersDocument) -> Self {
        let defaults = Self::default();
        let capacity = doc.capacity.unwrap_or(defaults.capacity);
        let significance_level = doc.significance_level.unwrap_or(defaults.significance_level);

        // Underivable combinations keep the default and are rejected by validate()
        let critical_t_value = doc.critical_t_value.unwrap_or_else(|| {
            Self::critical_value_for(capacity, significance_level)
                .unwrap_or(defaults.critical_t_value)
        });

        Self {
            capacity,
            critical_t_value,
            significance_level,
        }
    }
}

impl TrendParameters {
    /// Reference configuration: six readings, α = 0.05
    pub fn reference() -> Self {
        Self::default()
    }

    /// α = 0.05 parameters for `capacity`, using the built-in t table
    pub fn for_capacity(capacity: usize) -> Result<Self> {
        if capacity < MIN_POINTS {
            return Err(Error::capacity_too_small(capacity, MIN_POINTS));
        }
        let critical_t_value = student_t::table_critical_value(capacity - 2).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "no tabulated critical value for capacity {capacity}; use from_distribution"
            ))
        })?;

        Ok(Self {
            capacity,
            critical_t_value,
            significance_level: 0.05,
        })
    }

    /// Parameters for any capacity and significance level, derived from the t distribution
    pub fn from_distribution(capacity: usize, significance_level: f64) -> Result<Self> {
        if capacity < MIN_POINTS {
            return Err(Error::capacity_too_small(capacity, MIN_POINTS));
        }
        let critical_t_value =
            student_t::two_tailed_critical_value(significance_level, capacity - 2)?;

        Ok(Self {
            capacity,
            critical_t_value,
            significance_level,
        })
    }

    /// Two-tailed critical value for `capacity` at `significance_level`
    ///
    /// Uses the built-in table at α = 0.05 where it covers ν, the t
    /// distribution otherwise.
    pub fn critical_value_for(capacity: usize, significance_level: f64) -> Result<f64> {
        if capacity < MIN_POINTS {
            return Err(Error::capacity_too_small(capacity, MIN_POINTS));
        }
        let dof = capacity - 2;
        match student_t::table_critical_value(dof) {
            Some(value) if significance_level == 0.05 => Ok(value),
            _ => student_t::two_tailed_critical_value(significance_level, dof),
        }
    }

    /// Degrees of freedom of the slope test
    pub fn degrees_of_freedom(&self) -> usize {
        self.capacity.saturating_sub(2)
    }

    /// Check the parameters can drive a classifier
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_POINTS {
            return Err(Error::capacity_too_small(self.capacity, MIN_POINTS));
        }
        if !(self.critical_t_value.is_finite() && self.critical_t_value > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "critical t value {} must be positive and finite",
                self.critical_t_value
            )));
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "significance level {} must be in (0, 1)",
                self.significance_level
            )));
        }
        Ok(())
    }
}

/// Numbers behind the most recent verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendMetrics {
    /// Fitted change per sample
    pub slope: f64,

    /// Fitted value at the oldest sample
    pub intercept: f64,

    /// Sum of squared residuals
    pub sse: f64,

    /// Standard error of the slope
    pub slope_std_error: f64,

    /// |slope / stderr|
    pub t_observed: f64,

    /// Number of samples in the fit
    pub sample_count: usize,
}

impl fmt::Display for TrendMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope={:.4} intercept={:.4} sse={:.4} se={:.4} t={:.3} n={}",
            self.slope,
            self.intercept,
            self.sse,
            self.slope_std_error,
            self.t_observed,
            self.sample_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_keys() {
        for symbol in [
            TrendSymbol::Training,
            TrendSymbol::Falling,
            TrendSymbol::Steady,
            TrendSymbol::Rising,
        ] {
            assert_eq!(TrendSymbol::from_key(symbol.key()), Some(symbol));
        }
        assert_eq!(TrendSymbol::from_key(4), None);
        assert!(TrendSymbol::Training < TrendSymbol::Falling);
        assert!(TrendSymbol::Steady < TrendSymbol::Rising);
        assert!(!TrendSymbol::Training.is_trained());
    }

    #[test]
    fn test_reference_parameters() {
        let params = TrendParameters::reference();
        assert_eq!(params.capacity, 6);
        assert_eq!(params.degrees_of_freedom(), 4);
        assert!(params.validate().is_ok());
        assert_eq!(TrendParameters::for_capacity(6).unwrap(), params);
    }

    #[test]
    fn test_capacity_below_minimum() {
        assert!(TrendParameters::for_capacity(2).is_err());
        assert!(TrendParameters::from_distribution(2, 0.05).is_err());

        let params = TrendParameters {
            capacity: 2,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_untabulated_capacity() {
        assert!(TrendParameters::for_capacity(33).is_err());
        let params = TrendParameters::from_distribution(33, 0.05).unwrap();
        assert!(params.critical_t_value > 1.96 && params.critical_t_value < 2.05);
    }

    #[test]
    fn test_invalid_critical_value() {
        let params = TrendParameters {
            critical_t_value: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = TrendParameters {
            critical_t_value: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = TrendParameters {
            significance_level: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_critical_value_follows_capacity() {
        assert_eq!(TrendParameters::critical_value_for(6, 0.05).unwrap(), 2.776445105);
        assert_eq!(TrendParameters::critical_value_for(30, 0.05).unwrap(), 2.048407142);

        let wide = TrendParameters::critical_value_for(40, 0.05).unwrap();
        assert_eq!(wide, TrendParameters::from_distribution(40, 0.05).unwrap().critical_t_value);

        let strict = TrendParameters::critical_value_for(8, 0.01).unwrap();
        assert!((strict - 3.707428).abs() < 1e-5);

        assert!(TrendParameters::critical_value_for(2, 0.05).is_err());
        assert!(TrendParameters::critical_value_for(6, 1.5).is_err());
    }
}
