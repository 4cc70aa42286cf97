//! Simulation Runner
//!
//! Runs many independent trials and flattens them into one row per
//! (trial, meeting).

use meeting_core::{MeetingError, MeetingSequence, SequenceParams};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// Upper bound on rows reserved up front; larger runs grow as they go
const MAX_PREALLOCATED_ROWS: usize = 1 << 20;

/// One meeting of one trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Trial index, 0-based
    pub trial: usize,
    /// Meeting index within the trial, 0-based
    pub meeting_num: usize,
    pub n_in_person: usize,
    pub n_remote: usize,
    /// Mean utility, net of the hybrid fixed cost
    pub utility: f64,
}

/// Run `n_sims` trials of `n_meetings` meetings each.
///
/// Every trial samples a fresh population from `rng`, so trials are
/// independent draws. Trials run one after another from the same generator,
/// which keeps a seeded run reproducible.
pub fn run_simulations<R: Rng + ?Sized>(
    params: &SequenceParams,
    n_sims: usize,
    n_meetings: usize,
    rng: &mut R,
) -> Result<Vec<RoundRecord>, MeetingError> {
    let capacity = n_sims.saturating_mul(n_meetings).min(MAX_PREALLOCATED_ROWS);
    let mut rows = Vec::with_capacity(capacity);

    for trial in 0..n_sims {
        let mut sequence = MeetingSequence::new(params, &mut *rng)?;
        let series = sequence.hold_meeting_sequence(n_meetings);

        rows.extend(series.rounds().enumerate().map(|(meeting_num, round)| RoundRecord {
            trial,
            meeting_num,
            n_in_person: round.n_in_person,
            n_remote: round.n_remote,
            utility: round.mean_utility,
        }));

        if trial > 0 && trial % 100 == 0 {
            tracing::debug!("Completed {} / {} trials", trial, n_sims);
        }
    }

    Ok(rows)
}

/// Run everything a [`SimConfig`] describes, seeding a fresh generator.
pub fn run_config(config: &SimConfig) -> Result<Vec<RoundRecord>, MeetingError> {
    let mut rng = SmallRng::seed_from_u64(config.run.seed);
    run_simulations(&config.sequence, config.run.n_sims, config.run.n_meetings, &mut rng)
}
