//! The sampling loop: read, classify, sequence, wait

use crate::config::MissionConfig;
use crate::hardware::{Actuator, LightSource};
use crate::pacing::{NoPacer, Pacer, SleepPacer};
use crate::sequencer::DeploymentSequencer;
use crate::types::{DeploymentState, SequencerParameters, StateTransition};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use trend_classifier::{OnlineTrendAnalyzer, TrendClassifier, TrendParameters, TrendSymbol};
use trend_core::{Error, Result};

/// What happened in one sampling period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    /// 1-based index of the reading
    pub tick: usize,
    pub lux: f64,
    pub symbol: TrendSymbol,
    /// State after this period
    pub state: DeploymentState,
    pub transition: Option<StateTransition>,
}

/// Why a mission run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    Finished,
    SourceExhausted,
    TickLimit,
}

/// Outcome of [`MissionRunner::run`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionSummary {
    pub stop_reason: StopReason,
    pub final_state: DeploymentState,
    /// Readings taken, including rejected ones
    pub ticks: usize,
    pub rejected_readings: usize,
    pub hardware_faults: usize,
    pub actuated: bool,
    pub transitions: Vec<StateTransition>,
}

/// Drives a light source through the classifier and sequencer
pub struct MissionRunner<S: LightSource, A: Actuator, P: Pacer = NoPacer> {
    source: S,
    actuator: A,
    pacer: P,
    classifier: TrendClassifier<f64>,
    sequencer: DeploymentSequencer,
    ticks: usize,
    rejected: usize,
}

impl<S: LightSource, A: Actuator> MissionRunner<S, A, NoPacer> {
    /// Runner that does not wait between periods
    pub fn unpaced(
        trend: TrendParameters,
        sequencer: SequencerParameters,
        source: S,
        actuator: A,
    ) -> Result<Self> {
        Self::new(trend, sequencer, source, actuator, NoPacer)
    }
}

impl<S: LightSource, A: Actuator> MissionRunner<S, A, SleepPacer> {
    /// Runner paced in real time by the configured sample period
    pub fn from_config(config: &MissionConfig, source: S, actuator: A) -> Result<Self> {
        config.validate()?;
        Self::new(config.trend, config.sequencer, source, actuator, config.pacer())
    }
}

impl<S: LightSource, A: Actuator, P: Pacer> MissionRunner<S, A, P> {
    pub fn new(
        trend: TrendParameters,
        sequencer: SequencerParameters,
        source: S,
        actuator: A,
        pacer: P,
    ) -> Result<Self> {
        Ok(Self {
            classifier: TrendClassifier::new(trend)?,
            sequencer: DeploymentSequencer::new(sequencer)?,
            source,
            actuator,
            pacer,
            ticks: 0,
            rejected: 0,
        })
    }

    pub fn state(&self) -> DeploymentState {
        self.sequencer.state()
    }

    pub fn classifier(&self) -> &TrendClassifier<f64> {
        &self.classifier
    }

    pub fn sequencer(&self) -> &DeploymentSequencer {
        &self.sequencer
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Readings taken so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Non-finite readings dropped so far
    pub fn rejected_readings(&self) -> usize {
        self.rejected
    }

    /// Run one sampling period without waiting
    ///
    /// Errors:
    /// - `SourceExhausted` / `Hardware` from the light source
    /// - `InvalidInput` for a NaN or infinite reading; the reading is dropped
    ///   before it reaches the classifier and the period is skipped
    /// - `Hardware` from the actuator; the state is unchanged and the
    ///   transition is retried when its condition next holds
    #[instrument(skip(self), fields(tick = self.ticks + 1, state = %self.sequencer.state()))]
    pub fn step(&mut self) -> Result<TickReport> {
        let lux = self.source.read_lux()?;
        self.ticks += 1;

        if !lux.is_finite() {
            self.rejected += 1;
            warn!(lux, source = self.source.name(), "Dropping non-finite reading");
            return Err(Error::non_finite("lux reading"));
        }

        let symbol = self.classifier.observe(lux);
        let transition = self.sequencer.advance(lux, symbol, &mut self.actuator)?;
        let state = self.sequencer.state();

        debug!(lux, trend = symbol.key(), %symbol, %state, "Sample");

        Ok(TickReport {
            tick: self.ticks,
            lux,
            symbol,
            state,
            transition,
        })
    }

    /// Run until `Finished`, source exhaustion, or `max_ticks` sampling periods
    ///
    /// Rejected readings and hardware faults are logged and counted; the loop
    /// carries on with the next period. Any other error ends the run.
    pub fn run(&mut self, max_ticks: usize) -> Result<MissionSummary> {
        let mut transitions = Vec::new();
        let mut hardware_faults = 0;
        let mut periods = 0;

        info!(
            source = self.source.name(),
            actuator = self.actuator.name(),
            capacity = self.classifier.parameters().capacity,
            max_ticks,
            "Mission start"
        );

        let stop_reason = loop {
            if self.sequencer.is_finished() {
                break StopReason::Finished;
            }
            if periods >= max_ticks {
                break StopReason::TickLimit;
            }
            periods += 1;

            match self.step() {
                Ok(report) => transitions.extend(report.transition),
                Err(Error::SourceExhausted(readings)) => {
                    info!(readings, "Light source exhausted");
                    break StopReason::SourceExhausted;
                }
                Err(Error::InvalidInput(_)) => {}
                Err(Error::Hardware(details)) => {
                    hardware_faults += 1;
                    error!(%details, "Hardware fault");
                }
                Err(e) => return Err(e),
            }

            if !self.sequencer.is_finished() {
                self.pacer.wait();
            }
        };

        let summary = MissionSummary {
            stop_reason,
            final_state: self.sequencer.state(),
            ticks: self.ticks,
            rejected_readings: self.rejected,
            hardware_faults,
            actuated: self.sequencer.has_actuated(),
            transitions,
        };
        info!(
            stop_reason = ?summary.stop_reason,
            state = %summary.final_state,
            ticks = summary.ticks,
            "Mission end"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::RecordingActuator;
    use crate::sources::ScriptedLightSource;

    fn runner(readings: Vec<f64>) -> MissionRunner<ScriptedLightSource, RecordingActuator> {
        MissionRunner::unpaced(
            TrendParameters::reference(),
            SequencerParameters::default(),
            ScriptedLightSource::new(readings),
            RecordingActuator::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_step_reports_training() {
        let mut runner = runner(vec![2.0; 3]);
        let report = runner.step().unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.symbol, TrendSymbol::Training);
        assert_eq!(report.state, DeploymentState::Loading);
        assert_eq!(report.transition, None);
    }

    #[test]
    fn test_non_finite_reading_is_skipped() {
        let mut runner = runner(vec![2.0, f64::NAN, f64::INFINITY, 2.0]);
        runner.step().unwrap();
        assert!(matches!(runner.step(), Err(Error::InvalidInput(_))));
        assert!(matches!(runner.step(), Err(Error::InvalidInput(_))));
        runner.step().unwrap();

        assert_eq!(runner.ticks(), 4);
        assert_eq!(runner.rejected_readings(), 2);
        assert_eq!(runner.classifier().observation_count(), 2);
    }

    #[test]
    fn test_exhaustion_ends_run() {
        let mut runner = runner(vec![300.0; 8]);
        let summary = runner.run(100).unwrap();
        assert_eq!(summary.stop_reason, StopReason::SourceExhausted);
        assert_eq!(summary.final_state, DeploymentState::Loading);
        assert_eq!(summary.ticks, 8);
        assert!(!summary.actuated);
    }

    #[test]
    fn test_tick_limit() {
        let mut runner = runner(vec![300.0; 8]);
        let summary = runner.run(5).unwrap();
        assert_eq!(summary.stop_reason, StopReason::TickLimit);
        assert_eq!(summary.ticks, 5);
    }
}
