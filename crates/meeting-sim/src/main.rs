//! Hybrid Meeting Simulator
//!
//! Runs repeated trials of meeting sequences and writes per-round results.

use clap::Parser;
use meeting_core::{MeetingFormat, UtilityRule};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use meeting_sim::{default_config_toml, simulate, write_run, SimConfig, SimError};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "meeting_sim")]
#[command(about = "Simulate attendance dynamics of repeated hybrid meetings")]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent trials
    #[arg(long)]
    sims: Option<usize>,

    /// Meetings per trial
    #[arg(long)]
    meetings: Option<usize>,

    /// Agents per trial
    #[arg(long)]
    agents: Option<usize>,

    /// Meeting format: hybrid, irl, online
    #[arg(long)]
    format: Option<MeetingFormat>,

    /// Utility rule: linear, logarithmic
    #[arg(long)]
    utility: Option<UtilityRule>,

    /// Directory for result files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.run.seed = seed;
        }
        if let Some(sims) = self.sims {
            config.run.n_sims = sims;
        }
        if let Some(meetings) = self.meetings {
            config.run.n_meetings = meetings;
        }
        if let Some(agents) = self.agents {
            config.sequence.n_agents = agents;
        }
        if let Some(format) = self.format {
            config.sequence.meeting_format = format;
        }
        if let Some(utility) = self.utility {
            config.sequence.utility = utility;
        }
        if let Some(dir) = &self.output_dir {
            config.run.output_dir = dir.clone();
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    args.apply_overrides(&mut config);

    let run = simulate(&config)?;
    write_run(&config, &run)?;

    for meeting in &run.summary {
        tracing::info!(
            "[Meeting {:>3}] in person {:>6.2} (min {}, max {})  remote {:>6.2} (min {}, max {})  utility {:>8.3}",
            meeting.meeting_num,
            meeting.mean_in_person,
            meeting.min_in_person,
            meeting.max_in_person,
            meeting.mean_remote,
            meeting.min_remote,
            meeting.max_remote,
            meeting.mean_utility
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.print_default_config {
        return match default_config_toml() {
            Ok(toml) => {
                print!("{}", toml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
