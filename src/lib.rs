//! # lux-trend
//!
//! Statistical trend classification of an ambient-light signal, and the
//! light-triggered payload sequencing built on it.
//!
//! This is a facade crate re-exporting the workspace members:
//!
//! - [`trend_core`]: error type, sample window, least-squares fit, t critical values
//! - [`trend_classifier`]: `TrendClassifier` and the slope t-test
//! - [`payload_sequencer`]: deployment state machine, hardware seams, mission loop
//!
//! ## Quick Start
//!
//! ```rust
//! use lux_trend::prelude::*;
//!
//! let mut classifier = TrendClassifier::<f64>::reference()?;
//! let verdicts = classifier.observe_all([5.0, 5.0, 5.0, 5.0, 5.0, 4.0]);
//!
//! // A single step is not a trend
//! assert_eq!(verdicts[5], TrendSymbol::Steady);
//! # Ok::<(), lux_trend::Error>(())
//! ```

pub use payload_sequencer;
pub use trend_classifier;
pub use trend_core;

pub use trend_core::{Error, Result};

/// Commonly used types
pub mod prelude {
    pub use payload_sequencer::{
        ActuationPoint, Actuator, DeploymentSequencer, DeploymentState, LightProfile,
        LightSource, MissionConfig, MissionRunner, MissionSummary, NoPacer, Pacer,
        RecordingActuator, ReplayLightSource, ScriptedLightSource, Segment,
        SequencerParameters, SimulatedLightSource, SleepPacer, StopReason, TickReport,
    };
    pub use trend_classifier::{
        OnlineTrendAnalyzer, SlopeTest, TrendAnalyzerProperties, TrendClassifier, TrendMetrics,
        TrendParameters, TrendSymbol,
    };
    pub use trend_core::{Error, LinearFit, Numeric, Result, SampleWindow};
}
