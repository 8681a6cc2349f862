//! Common types for payload deployment sequencing

use serde::{Deserialize, Serialize};
use std::fmt;
use trend_core::{Error, Result};

/// Phase of a deployment mission
///
/// Phases only ever move forward, one step per sampling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeploymentState {
    /// Payload is being loaded; waiting for steady darkness
    Loading,

    /// Loaded and dark; waiting for steady light
    Waiting,

    /// Light seen after the dark phase; deployment under way
    Deploying,

    /// Mission complete; terminal
    Finished,
}

impl DeploymentState {
    /// The state that follows this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            DeploymentState::Loading => Some(DeploymentState::Waiting),
            DeploymentState::Waiting => Some(DeploymentState::Deploying),
            DeploymentState::Deploying => Some(DeploymentState::Finished),
            DeploymentState::Finished => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == DeploymentState::Finished
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentState::Loading => write!(f, "Loading"),
            DeploymentState::Waiting => write!(f, "Waiting"),
            DeploymentState::Deploying => write!(f, "Deploying"),
            DeploymentState::Finished => write!(f, "Finished"),
        }
    }
}

/// Which state entry fires the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuationPoint {
    /// Fire when steady darkness is first confirmed
    #[default]
    OnWaiting,

    /// Fire when steady light is first confirmed after the dark phase
    OnDeploying,
}

impl ActuationPoint {
    /// State whose entry triggers the actuator
    pub fn trigger_state(self) -> DeploymentState {
        match self {
            ActuationPoint::OnWaiting => DeploymentState::Waiting,
            ActuationPoint::OnDeploying => DeploymentState::Deploying,
        }
    }
}

/// Parameters for the deployment sequencer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerParameters {
    /// Lux level separating "dark" from "light" (strict on both sides)
    pub low_lux_threshold: f64,

    /// When the actuator fires
    pub actuation: ActuationPoint,

    /// Qualifying periods spent in `Deploying` before `Finished`
    pub finish_after_samples: usize,
}

impl Default for SequencerParameters {
    fn default() -> Self {
        Self {
            low_lux_threshold: 10.0,
            actuation: ActuationPoint::OnWaiting,
            finish_after_samples: 1,
        }
    }
}

impl SequencerParameters {
    /// Fire the actuator when deployment starts rather than when loading completes
    pub fn actuate_on_deploy() -> Self {
        Self {
            actuation: ActuationPoint::OnDeploying,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low_lux_threshold.is_finite() || self.low_lux_threshold < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "low lux threshold {} must be finite and non-negative",
                self.low_lux_threshold
            )));
        }
        if self.finish_after_samples == 0 {
            return Err(Error::InvalidParameter(
                "finish_after_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A committed change of deployment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: DeploymentState,
    pub to: DeploymentState,
    /// Whether the actuator fired as part of this transition
    pub actuated: bool,
}

impl fmt::Display for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.actuated {
            write!(f, " (actuated)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_only_advance() {
        let mut state = DeploymentState::Loading;
        let mut seen = vec![state];
        while let Some(next) = state.next() {
            assert!(next > state);
            state = next;
            seen.push(state);
        }
        assert_eq!(seen.len(), 4);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_default_parameters() {
        let params = SequencerParameters::default();
        assert_eq!(params.low_lux_threshold, 10.0);
        assert_eq!(params.actuation.trigger_state(), DeploymentState::Waiting);
        assert_eq!(params.finish_after_samples, 1);
        assert!(params.validate().is_ok());

        let deploy = SequencerParameters::actuate_on_deploy();
        assert_eq!(deploy.actuation.trigger_state(), DeploymentState::Deploying);
    }

    #[test]
    fn test_invalid_parameters() {
        let params = SequencerParameters {
            finish_after_samples: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));

        let params = SequencerParameters {
            low_lux_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_transition_display() {
        let t = StateTransition {
            from: DeploymentState::Loading,
            to: DeploymentState::Waiting,
            actuated: true,
        };
        assert_eq!(t.to_string(), "Loading -> Waiting (actuated)");
    }
}
