//! Simulation driver: repeated trials of hybrid meeting sequences.
//!
//! The driver sits on top of `meeting-core`. It samples a fresh population
//! per trial, runs a fixed number of meetings, and records one row per
//! (trial, meeting).
//!
//! ```text
//! ┌──────────────┐   SequenceParams    ┌──────────────┐   rounds.jsonl
//! │ meeting-core │ ◀───────────────── │ meeting-sim  │ ──────────────▶
//! └──────────────┘   MeetingSeries    └──────────────┘   summary.json
//! ```
//!
//! # Modules
//!
//! - [`config`]: TOML configuration for a run
//! - [`runner`]: Trial loop and per-round records
//! - [`stats`]: Cross-trial summaries per meeting number
//! - [`output`]: JSON Lines and summary files

pub mod config;
pub mod output;
pub mod runner;
pub mod stats;

pub use config::{default_config_toml, ConfigError, RunConfig, SimConfig};
pub use output::{read_rounds, read_summary, OutputError, OutputWriter, RunSummary};
pub use runner::{run_config, run_simulations, RoundRecord};
pub use stats::{summarize, MeetingSummary};

use thiserror::Error;

/// Errors that can occur while running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Error loading configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error constructing or running meetings
    #[error("Meeting error: {0}")]
    Meeting(#[from] meeting_core::MeetingError),
    /// Error writing results
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub records: Vec<RoundRecord>,
    pub summary: Vec<MeetingSummary>,
}

/// Validate `config`, run every trial, and summarize.
pub fn simulate(config: &SimConfig) -> Result<SimulationRun, SimError> {
    config.validate()?;

    tracing::info!(
        n_sims = config.run.n_sims,
        n_meetings = config.run.n_meetings,
        n_agents = config.sequence.n_agents,
        format = %config.sequence.meeting_format,
        utility = %config.sequence.utility,
        seed = config.run.seed,
        "Starting simulation"
    );

    let records = run_config(config)?;
    let summary = summarize(&records);

    tracing::info!("Simulation complete: {} rows", records.len());
    Ok(SimulationRun { records, summary })
}

/// Write a run's rows and summary into `config.run.output_dir`.
pub fn write_run(config: &SimConfig, run: &SimulationRun) -> Result<(), SimError> {
    let mut writer = OutputWriter::new(&config.run.output_dir)?;
    writer.write_rounds(&run.records)?;
    writer.write_summary(config, &run.summary)?;

    tracing::info!(
        "Wrote {} rows to {}",
        writer.rows_written(),
        writer.output_dir().display()
    );
    Ok(())
}
