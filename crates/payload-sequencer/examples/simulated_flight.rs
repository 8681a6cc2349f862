//! Fly the reference light profile through the full mission loop.
//!
//! ```text
//! cargo run -p payload-sequencer --example simulated_flight -- [config.json] [flight_log.csv]
//! RUST_LOG=debug cargo run -p payload-sequencer --example simulated_flight
//! ```
//!
//! Without a flight log the light comes from a noisy simulation. The sample
//! period from the config is honoured only when replaying, so a simulated
//! flight finishes instantly.

use anyhow::Result;
use payload_sequencer::{
    LightProfile, LightSource, MissionConfig, MissionRunner, MissionSummary, NoPacer,
    RecordingActuator, ReplayLightSource, SimulatedLightSource,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => MissionConfig::from_path(path)?,
        None => MissionConfig::default(),
    };
    println!("{}", config.to_json_string()?);

    let summary = match args.next() {
        Some(log) => {
            let source = ReplayLightSource::from_path(log)?;
            let mut runner = MissionRunner::from_config(&config, source, RecordingActuator::new())?;
            runner.run(10_000)?
        }
        // Simulated flights run on NoPacer; the sample period applies only to replays
        None => {
            let source = SimulatedLightSource::new(LightProfile::reference_flight(), 1.0, 2024)?;
            fly(config, source)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn fly<S: LightSource>(config: MissionConfig, source: S) -> Result<MissionSummary> {
    let mut runner = MissionRunner::new(
        config.trend,
        config.sequencer,
        source,
        RecordingActuator::new(),
        NoPacer,
    )?;
    let summary = runner.run(10_000)?;
    println!("actuator fired {} time(s)", runner.actuator().fires());
    Ok(summary)
}
