//! Deployment state machine
//!
//! Each sampling period the sequencer sees the raw reading and the trend
//! verdict for the window ending at that reading. A transition needs a
//! `Steady` verdict, so a reading that is merely passing through a level
//! does not count; the level has to have settled.
//!
//! ```text
//! Loading --(lux < threshold, Steady)--> Waiting
//! Waiting --(lux > threshold, Steady)--> Deploying
//! Deploying --(finish_after_samples × (lux > threshold, Steady))--> Finished
//! ```

use crate::hardware::Actuator;
use crate::types::{DeploymentState, SequencerParameters, StateTransition};
use tracing::{debug, info, warn};
use trend_classifier::TrendSymbol;
use trend_core::Result;

#[derive(Debug, Clone)]
pub struct DeploymentSequencer {
    params: SequencerParameters,
    state: DeploymentState,
    deploying_periods: usize,
    actuated: bool,
}

impl DeploymentSequencer {
    pub fn new(params: SequencerParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: DeploymentState::Loading,
            deploying_periods: 0,
            actuated: false,
        })
    }

    pub fn state(&self) -> DeploymentState {
        self.state
    }

    pub fn parameters(&self) -> &SequencerParameters {
        &self.params
    }

    /// True once the actuator has fired successfully
    pub fn has_actuated(&self) -> bool {
        self.actuated
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    fn is_dark(&self, lux: f64) -> bool {
        lux < self.params.low_lux_threshold
    }

    fn is_light(&self, lux: f64) -> bool {
        lux > self.params.low_lux_threshold
    }

    /// Evaluate one sampling period
    ///
    /// Returns the transition taken, if any. At most one transition happens
    /// per call. If entering the new state requires the actuator and it
    /// fails, the error is returned and the state is left unchanged, so the
    /// same condition on a later period tries again.
    pub fn advance<A: Actuator + ?Sized>(
        &mut self,
        lux: f64,
        symbol: TrendSymbol,
        actuator: &mut A,
    ) -> Result<Option<StateTransition>> {
        let steady = symbol == TrendSymbol::Steady;

        let target = match self.state {
            DeploymentState::Loading if steady && self.is_dark(lux) => DeploymentState::Waiting,
            DeploymentState::Waiting if steady && self.is_light(lux) => DeploymentState::Deploying,
            DeploymentState::Deploying if steady && self.is_light(lux) => {
                if self.deploying_periods + 1 < self.params.finish_after_samples {
                    self.deploying_periods += 1;
                    debug!(
                        periods = self.deploying_periods,
                        required = self.params.finish_after_samples,
                        "Deployment in progress"
                    );
                    return Ok(None);
                }
                DeploymentState::Finished
            }
            _ => return Ok(None),
        };

        self.enter(target, actuator).map(Some)
    }

    fn enter<A: Actuator + ?Sized>(
        &mut self,
        target: DeploymentState,
        actuator: &mut A,
    ) -> Result<StateTransition> {
        let fire = !self.actuated && target == self.params.actuation.trigger_state();
        if fire {
            if let Err(e) = actuator.fire() {
                warn!(
                    actuator = actuator.name(),
                    state = %self.state,
                    error = %e,
                    "Actuation failed; staying put"
                );
                return Err(e);
            }
            self.actuated = true;
            info!(actuator = actuator.name(), "Actuator fired");
        }

        let transition = StateTransition {
            from: self.state,
            to: target,
            actuated: fire,
        };
        self.state = target;
        self.deploying_periods = 0;
        info!(%transition, "State change");
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::RecordingActuator;
    use crate::types::ActuationPoint;
    use trend_core::Error;

    use TrendSymbol::{Falling, Rising, Steady, Training};

    fn sequencer() -> DeploymentSequencer {
        DeploymentSequencer::new(SequencerParameters::default()).unwrap()
    }

    #[test]
    fn test_full_sequence() {
        let mut seq = sequencer();
        let mut actuator = RecordingActuator::new();

        let t = seq.advance(3.0, Steady, &mut actuator).unwrap().unwrap();
        assert_eq!(t.to, DeploymentState::Waiting);
        assert!(t.actuated);
        assert_eq!(actuator.fires(), 1);

        let t = seq.advance(200.0, Steady, &mut actuator).unwrap().unwrap();
        assert_eq!(t.to, DeploymentState::Deploying);
        assert!(!t.actuated);

        let t = seq.advance(200.0, Steady, &mut actuator).unwrap().unwrap();
        assert_eq!(t.to, DeploymentState::Finished);
        assert!(seq.is_finished());

        assert_eq!(seq.advance(0.0, Steady, &mut actuator).unwrap(), None);
        assert_eq!(actuator.fires(), 1);
    }

    #[test]
    fn test_requires_steady_verdict() {
        let mut seq = sequencer();
        let mut actuator = RecordingActuator::new();
        for symbol in [Training, Falling, Rising] {
            assert_eq!(seq.advance(1.0, symbol, &mut actuator).unwrap(), None);
        }
        assert_eq!(seq.state(), DeploymentState::Loading);
        assert_eq!(actuator.attempts(), 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut seq = sequencer();
        let mut actuator = RecordingActuator::new();
        assert_eq!(seq.advance(10.0, Steady, &mut actuator).unwrap(), None);
        assert_eq!(seq.state(), DeploymentState::Loading);

        seq.advance(9.99, Steady, &mut actuator).unwrap();
        assert_eq!(seq.state(), DeploymentState::Waiting);
        assert_eq!(seq.advance(10.0, Steady, &mut actuator).unwrap(), None);
        assert_eq!(seq.state(), DeploymentState::Waiting);
    }

    #[test]
    fn test_one_transition_per_period() {
        let mut seq = sequencer();
        let mut actuator = RecordingActuator::new();
        seq.advance(1.0, Steady, &mut actuator).unwrap();
        seq.advance(50.0, Steady, &mut actuator).unwrap();
        assert_eq!(seq.state(), DeploymentState::Deploying);
    }

    #[test]
    fn test_finish_dwell() {
        let params = SequencerParameters {
            finish_after_samples: 3,
            ..Default::default()
        };
        let mut seq = DeploymentSequencer::new(params).unwrap();
        let mut actuator = RecordingActuator::new();
        seq.advance(1.0, Steady, &mut actuator).unwrap();
        seq.advance(50.0, Steady, &mut actuator).unwrap();

        assert_eq!(seq.advance(50.0, Steady, &mut actuator).unwrap(), None);
        // Non-qualifying periods neither count nor reset
        assert_eq!(seq.advance(50.0, Rising, &mut actuator).unwrap(), None);
        assert_eq!(seq.advance(50.0, Steady, &mut actuator).unwrap(), None);
        assert_eq!(seq.state(), DeploymentState::Deploying);

        let t = seq.advance(50.0, Steady, &mut actuator).unwrap().unwrap();
        assert_eq!(t.to, DeploymentState::Finished);
    }

    #[test]
    fn test_actuate_on_deploy() {
        let mut seq = DeploymentSequencer::new(SequencerParameters::actuate_on_deploy()).unwrap();
        let mut actuator = RecordingActuator::new();

        let t = seq.advance(1.0, Steady, &mut actuator).unwrap().unwrap();
        assert!(!t.actuated);
        assert_eq!(actuator.fires(), 0);

        let t = seq.advance(80.0, Steady, &mut actuator).unwrap().unwrap();
        assert!(t.actuated);
        assert_eq!(seq.parameters().actuation, ActuationPoint::OnDeploying);
        assert_eq!(actuator.fires(), 1);
        assert!(seq.has_actuated());
    }

    #[test]
    fn test_actuator_failure_is_retried() {
        let mut seq = sequencer();
        let mut actuator = RecordingActuator::failing(1);

        assert!(matches!(
            seq.advance(1.0, Steady, &mut actuator),
            Err(Error::Hardware(_))
        ));
        assert_eq!(seq.state(), DeploymentState::Loading);
        assert!(!seq.has_actuated());

        let t = seq.advance(1.0, Steady, &mut actuator).unwrap().unwrap();
        assert_eq!(t.to, DeploymentState::Waiting);
        assert!(t.actuated);
        assert_eq!(actuator.attempts(), 2);
        assert_eq!(actuator.fires(), 1);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let params = SequencerParameters {
            finish_after_samples: 0,
            ..Default::default()
        };
        assert!(DeploymentSequencer::new(params).is_err());
    }
}
