//! Light sources that do not need a sensor attached
//!
//! - [`ScriptedLightSource`]: a fixed list of readings
//! - [`SimulatedLightSource`]: a piecewise-linear light profile plus seeded noise
//! - [`ReplayLightSource`]: the `lux` column of a recorded CSV flight log

use crate::hardware::LightSource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;
use trend_core::{Error, Result};

/// Plays back a fixed sequence of readings, then reports exhaustion
#[derive(Debug, Clone)]
pub struct ScriptedLightSource {
    readings: VecDeque<f64>,
    served: usize,
}

impl ScriptedLightSource {
    pub fn new<I: IntoIterator<Item = f64>>(readings: I) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            served: 0,
        }
    }

    /// Readings not yet served
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl LightSource for ScriptedLightSource {
    fn read_lux(&mut self) -> Result<f64> {
        let lux = self
            .readings
            .pop_front()
            .ok_or(Error::SourceExhausted(self.served))?;
        self.served += 1;
        Ok(lux)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// One piece of a light profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start_lux: f64,
    pub end_lux: f64,
    /// Number of sampling periods the segment lasts
    pub periods: usize,
}

impl Segment {
    /// Constant light for `periods` samples
    pub fn hold(lux: f64, periods: usize) -> Self {
        Self {
            start_lux: lux,
            end_lux: lux,
            periods,
        }
    }

    /// Linear change from `from` to `to` over `periods` samples
    pub fn ramp(from: f64, to: f64, periods: usize) -> Self {
        Self {
            start_lux: from,
            end_lux: to,
            periods,
        }
    }

    fn lux_at(&self, offset: usize) -> f64 {
        if self.periods <= 1 {
            return self.end_lux;
        }
        let fraction = offset as f64 / (self.periods - 1) as f64;
        self.start_lux + (self.end_lux - self.start_lux) * fraction
    }
}

/// Noise-free light level over a mission, one value per period
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightProfile {
    segments: Vec<Segment>,
}

impl LightProfile {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Bench daylight, dark while loaded, then daylight again after release
    pub fn reference_flight() -> Self {
        Self::new(vec![
            Segment::hold(320.0, 10),
            Segment::ramp(320.0, 2.0, 4),
            Segment::hold(2.0, 14),
            Segment::ramp(2.0, 250.0, 4),
            Segment::hold(250.0, 14),
        ])
    }

    pub fn then(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Total number of periods covered
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.periods).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Noise-free lux at `period`, or None past the end
    pub fn lux_at(&self, period: usize) -> Option<f64> {
        let mut offset = period;
        for segment in &self.segments {
            if offset < segment.periods {
                return Some(segment.lux_at(offset));
            }
            offset -= segment.periods;
        }
        None
    }

    fn validate(&self) -> Result<()> {
        for segment in &self.segments {
            if !(segment.start_lux.is_finite() && segment.end_lux.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "profile segment {segment:?} has a non-finite level"
                )));
            }
        }
        Ok(())
    }
}

/// Follows a [`LightProfile`] with additive Gaussian sensor noise
///
/// Readings are clamped at 0 lux. The generator is seeded, so a given
/// profile, noise level and seed always produce the same flight.
#[derive(Debug, Clone)]
pub struct SimulatedLightSource {
    profile: LightProfile,
    noise: Normal<f64>,
    rng: ChaCha8Rng,
    period: usize,
}

impl SimulatedLightSource {
    pub fn new(profile: LightProfile, noise_std_dev: f64, seed: u64) -> Result<Self> {
        profile.validate()?;
        let noise = Normal::new(0.0, noise_std_dev).map_err(|e| {
            Error::InvalidParameter(format!("noise standard deviation {noise_std_dev}: {e}"))
        })?;

        Ok(Self {
            profile,
            noise,
            rng: ChaCha8Rng::seed_from_u64(seed),
            period: 0,
        })
    }

    /// Periods simulated so far
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn profile(&self) -> &LightProfile {
        &self.profile
    }
}

impl LightSource for SimulatedLightSource {
    fn read_lux(&mut self) -> Result<f64> {
        let level = self
            .profile
            .lux_at(self.period)
            .ok_or(Error::SourceExhausted(self.period))?;
        self.period += 1;
        Ok((level + self.noise.sample(&mut self.rng)).max(0.0))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Replays the `lux` column of a recorded flight log
///
/// The log must have a header row; other columns are ignored. Values are
/// parsed up front so a malformed log fails before the mission starts.
/// `NaN`/`inf` cells parse successfully and are left for the runner to reject.
#[derive(Debug, Clone)]
pub struct ReplayLightSource {
    inner: ScriptedLightSource,
}

impl ReplayLightSource {
    pub const LUX_COLUMN: &'static str = "lux";

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let column = csv
            .headers()?
            .iter()
            .position(|h| h.eq_ignore_ascii_case(Self::LUX_COLUMN))
            .ok_or_else(|| {
                Error::InvalidInput(format!("flight log has no '{}' column", Self::LUX_COLUMN))
            })?;

        let mut readings = Vec::new();
        for (row, record) in csv.records().enumerate() {
            let record = record?;
            let cell = record.get(column).ok_or_else(|| {
                Error::InvalidInput(format!("row {}: missing lux value", row + 1))
            })?;
            let lux = cell.parse::<f64>().map_err(|e| {
                Error::InvalidInput(format!("row {}: '{cell}' is not a number: {e}", row + 1))
            })?;
            readings.push(lux);
        }

        Ok(Self {
            inner: ScriptedLightSource::new(readings),
        })
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl LightSource for ReplayLightSource {
    fn read_lux(&mut self) -> Result<f64> {
        self.inner.read_lux()
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scripted_source_exhausts() {
        let mut source = ScriptedLightSource::new([1.0, 2.0]);
        assert_eq!(source.read_lux().unwrap(), 1.0);
        assert_eq!(source.read_lux().unwrap(), 2.0);
        assert!(matches!(source.read_lux(), Err(Error::SourceExhausted(2))));
    }

    #[test]
    fn test_profile_interpolation() {
        let profile = LightProfile::default()
            .then(Segment::hold(5.0, 2))
            .then(Segment::ramp(0.0, 30.0, 4));
        assert_eq!(profile.len(), 6);
        assert_eq!(profile.lux_at(1), Some(5.0));
        assert_relative_eq!(profile.lux_at(2).unwrap(), 0.0);
        assert_relative_eq!(profile.lux_at(3).unwrap(), 10.0);
        assert_relative_eq!(profile.lux_at(5).unwrap(), 30.0);
        assert_eq!(profile.lux_at(6), None);
    }

    #[test]
    fn test_simulation_is_seeded() {
        let profile = LightProfile::reference_flight();
        let mut a = SimulatedLightSource::new(profile.clone(), 1.5, 42).unwrap();
        let mut b = SimulatedLightSource::new(profile, 1.5, 42).unwrap();
        for _ in 0..20 {
            let x = a.read_lux().unwrap();
            assert_eq!(x, b.read_lux().unwrap());
            assert!(x >= 0.0);
        }
    }

    #[test]
    fn test_noiseless_simulation_follows_profile() {
        let profile = LightProfile::new(vec![Segment::ramp(10.0, 0.0, 3)]);
        let mut source = SimulatedLightSource::new(profile, 0.0, 1).unwrap();
        assert_relative_eq!(source.read_lux().unwrap(), 10.0);
        assert_relative_eq!(source.read_lux().unwrap(), 5.0);
        assert_relative_eq!(source.read_lux().unwrap(), 0.0);
        assert!(matches!(source.read_lux(), Err(Error::SourceExhausted(3))));
    }

    #[test]
    fn test_invalid_noise() {
        assert!(SimulatedLightSource::new(LightProfile::reference_flight(), -1.0, 0).is_err());
    }

    #[test]
    fn test_replay_reads_lux_column() {
        let log = "t_ms,lux,temp\n0,12.5,20\n2000, 11.0 ,20\n4000,NaN,21\n";
        let mut source = ReplayLightSource::from_reader(log.as_bytes()).unwrap();
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.read_lux().unwrap(), 12.5);
        assert_eq!(source.read_lux().unwrap(), 11.0);
        assert!(source.read_lux().unwrap().is_nan());
        assert!(matches!(source.read_lux(), Err(Error::SourceExhausted(3))));
    }

    #[test]
    fn test_replay_rejects_bad_logs() {
        let missing = "t_ms,brightness\n0,1\n";
        assert!(matches!(
            ReplayLightSource::from_reader(missing.as_bytes()),
            Err(Error::InvalidInput(_))
        ));

        let garbage = "lux\n1.0\nbright\n";
        assert!(matches!(
            ReplayLightSource::from_reader(garbage.as_bytes()),
            Err(Error::InvalidInput(_))
        ));
    }
}
