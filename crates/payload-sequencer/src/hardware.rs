//! Hardware seams: where readings come from and what gets fired
//!
//! Bus protocols and device setup live behind these traits. The sequencer
//! only needs one lux value per period and a single "fire" command.

use trend_core::{Error, Result};

/// A source of ambient-light readings, one per sampling period
pub trait LightSource {
    /// Take one reading in lux
    ///
    /// Finite sources return [`Error::SourceExhausted`] once they run dry.
    fn read_lux(&mut self) -> Result<f64>;

    /// Short name used in log lines
    fn name(&self) -> &str {
        "light source"
    }
}

/// The payload release mechanism
pub trait Actuator {
    /// Trigger the mechanism once
    fn fire(&mut self) -> Result<()>;

    fn name(&self) -> &str {
        "actuator"
    }
}

impl<L: LightSource + ?Sized> LightSource for Box<L> {
    fn read_lux(&mut self) -> Result<f64> {
        (**self).read_lux()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn fire(&mut self) -> Result<()> {
        (**self).fire()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Actuator that records how often it was fired
///
/// It can be told to fail a number of times first, which is how tests
/// exercise the retry path.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    fires: usize,
    attempts: usize,
    failures_remaining: usize,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `failures` calls to `fire`, then succeed
    pub fn failing(failures: usize) -> Self {
        Self {
            failures_remaining: failures,
            ..Self::default()
        }
    }

    /// Successful fires
    pub fn fires(&self) -> usize {
        self.fires
    }

    /// All calls to `fire`, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Actuator for RecordingActuator {
    fn fire(&mut self) -> Result<()> {
        self.attempts += 1;
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(Error::hardware(self.name(), "relay did not respond"));
        }
        self.fires += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "recording actuator"
    }
}
