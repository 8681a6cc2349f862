//! Core types for trend classification
//!
//! This crate provides the building blocks the trend classifier is assembled
//! from: a bounded window of recent readings, an ordinary least-squares fit of
//! those readings against time, and the Student's t critical values used to
//! decide whether a fitted slope is distinguishable from zero.
//!
//! # Example
//!
//! ```rust
//! use trend_core::{LinearFit, SampleWindow};
//!
//! let mut window = SampleWindow::new(6).unwrap();
//! for lux in [5.0, 5.0, 5.0, 5.0, 5.0, 4.0] {
//!     window.push(lux);
//! }
//!
//! let fit = LinearFit::against_index(&window.to_vec()).unwrap();
//! assert!(fit.slope < 0.0);
//! assert!(fit.t_statistic() < 2.776445105);
//! ```

pub mod error;
pub mod math;
pub mod numeric;
pub mod window;

// Re-export core types
pub use error::{Error, Result};
pub use math::distributions::student_t;
pub use math::regression::LinearFit;
pub use numeric::Numeric;
pub use window::SampleWindow;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
