//! Numeric reading types
//!
//! Sensors hand out readings in whatever unit their driver prefers: some
//! return floating-point lux, others fixed-point integers. `Numeric` lets the
//! window hold the native type while all regression arithmetic runs in `f64`.

use std::fmt::Debug;

/// Base trait for reading types that can be fed to the trend engine
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Check if value is finite (always true for integers)
    fn is_finite(&self) -> bool;

    /// Convert to f64 for regression
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }

                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn is_finite(&self) -> bool {
                    true
                }

                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric_float!(f64, f32);
impl_numeric_int!(i32, u32, i64, u64, u16);
