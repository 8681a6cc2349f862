//! # Payload Sequencer
//!
//! Light-triggered deployment on top of the trend classifier. Once per
//! sampling period a [`MissionRunner`] takes a lux reading from a
//! [`LightSource`], asks the [`trend_classifier::TrendClassifier`] for a trend
//! verdict, and lets the [`DeploymentSequencer`] decide whether the mission
//! moves on:
//!
//! `Loading` (wait for steady dark) → `Waiting` (wait for steady light) →
//! `Deploying` → `Finished`
//!
//! The [`Actuator`] is fired exactly once, on entering the state picked by
//! [`ActuationPoint`].
//!
//! ## Usage
//!
//! ```rust
//! use payload_sequencer::{
//!     DeploymentState, LightProfile, MissionRunner, RecordingActuator, SequencerParameters,
//!     SimulatedLightSource,
//! };
//! use trend_classifier::TrendParameters;
//!
//! let source = SimulatedLightSource::new(LightProfile::reference_flight(), 0.0, 7).unwrap();
//! let mut runner = MissionRunner::unpaced(
//!     TrendParameters::reference(),
//!     SequencerParameters::default(),
//!     source,
//!     RecordingActuator::new(),
//! )
//! .unwrap();
//!
//! let summary = runner.run(200).unwrap();
//! assert_eq!(summary.final_state, DeploymentState::Finished);
//! assert_eq!(runner.actuator().fires(), 1);
//! ```

pub mod config;
pub mod hardware;
pub mod pacing;
pub mod runner;
pub mod sequencer;
pub mod sources;
pub mod types;

// Re-exports
pub use config::MissionConfig;
pub use hardware::{Actuator, LightSource, RecordingActuator};
pub use pacing::{NoPacer, Pacer, SleepPacer};
pub use runner::{MissionRunner, MissionSummary, StopReason, TickReport};
pub use sequencer::DeploymentSequencer;
pub use sources::{LightProfile, ReplayLightSource, ScriptedLightSource, Segment, SimulatedLightSource};
pub use types::{ActuationPoint, DeploymentState, SequencerParameters, StateTransition};
