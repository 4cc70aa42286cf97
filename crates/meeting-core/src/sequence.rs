//! Meeting Sequences
//!
//! The round recurrence. Agents decide on the previous round's realized
//! counts, the tally of those decisions is the new realized count, and it
//! becomes the estimate for the round after.

use rand::Rng;
use serde::Serialize;

use crate::agent::Utility;
use crate::error::MeetingError;
use crate::format::{Attendance, MeetingFormat};
use crate::params::SequenceParams;

/// Result of a single meeting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeetingOutcome {
    pub n_in_person: usize,
    pub n_remote: usize,
    pub mean_utility: f64,
}

/// Per-round results of [`MeetingSequence::hold_meeting_sequence`], in round order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingSeries {
    pub in_person: Vec<usize>,
    pub remote: Vec<usize>,
    pub utilities: Vec<f64>,
}

impl MeetingSeries {
    fn with_capacity(n: usize) -> Self {
        Self {
            in_person: Vec::with_capacity(n),
            remote: Vec::with_capacity(n),
            utilities: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, outcome: MeetingOutcome) {
        self.in_person.push(outcome.n_in_person);
        self.remote.push(outcome.n_remote);
        self.utilities.push(outcome.mean_utility);
    }

    pub fn len(&self) -> usize {
        self.utilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utilities.is_empty()
    }

    /// Iterate rounds as outcomes, zipping the three columns back together
    pub fn rounds(&self) -> impl Iterator<Item = MeetingOutcome> + '_ {
        self.in_person
            .iter()
            .zip(&self.remote)
            .zip(&self.utilities)
            .map(|((&n_in_person, &n_remote), &mean_utility)| MeetingOutcome {
                n_in_person,
                n_remote,
                mean_utility,
            })
    }
}

/// A fixed population of agents meeting repeatedly.
#[derive(Debug)]
pub struct MeetingSequence {
    agents: Vec<Box<dyn Utility>>,
    /// Expected in-person attendance for the upcoming meeting
    in_person_estimate: usize,
    /// Expected remote attendance for the upcoming meeting
    remote_estimate: usize,
    meeting_format: MeetingFormat,
    hybrid_fixed_cost: f64,
}

impl MeetingSequence {
    /// Sample `params.n_agents` agents from `rng` and reset the estimate.
    pub fn new<R: Rng + ?Sized>(params: &SequenceParams, rng: &mut R) -> Result<Self, MeetingError> {
        let sampler = params.sampler()?;
        let agents = (0..params.n_agents)
            .map(|_| params.utility.build(sampler.sample(&mut *rng)))
            .collect();

        Self::from_agents(agents, params.meeting_format, params.hybrid_fixed_cost)
    }

    /// Build a sequence around an explicit population.
    pub fn from_agents(
        agents: Vec<Box<dyn Utility>>,
        meeting_format: MeetingFormat,
        hybrid_fixed_cost: f64,
    ) -> Result<Self, MeetingError> {
        if agents.is_empty() {
            return Err(MeetingError::EmptyPopulation);
        }
        if !hybrid_fixed_cost.is_finite() {
            return Err(MeetingError::invalid(
                "hybrid_fixed_cost",
                format!("{} is not finite", hybrid_fixed_cost),
            ));
        }

        let mut sequence = Self {
            agents,
            in_person_estimate: 0,
            remote_estimate: 0,
            meeting_format,
            hybrid_fixed_cost,
        };
        sequence.reset();
        Ok(sequence)
    }

    pub fn n_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[Box<dyn Utility>] {
        &self.agents
    }

    pub fn meeting_format(&self) -> MeetingFormat {
        self.meeting_format
    }

    pub fn hybrid_fixed_cost(&self) -> f64 {
        self.hybrid_fixed_cost
    }

    /// Current `(in_person, remote)` estimate for the upcoming meeting
    pub fn estimate(&self) -> (usize, usize) {
        (self.in_person_estimate, self.remote_estimate)
    }

    /// Restore the format's initial estimate. Agents are untouched.
    pub fn reset(&mut self) {
        let (in_person, remote) = self.meeting_format.initial_estimate(self.agents.len());
        self.in_person_estimate = in_person;
        self.remote_estimate = remote;
    }

    /// Hold one meeting.
    ///
    /// Decisions use the estimate from before this meeting; realized
    /// utilities use this meeting's actual counts. The counts then replace
    /// the estimate. The returned mean utility does not include the hybrid
    /// fixed cost.
    pub fn hold_meeting(&mut self, meeting_format: MeetingFormat) -> MeetingOutcome {
        let choices: Vec<Attendance> = self
            .agents
            .iter()
            .map(|agent| agent.attends(self.in_person_estimate, self.remote_estimate, meeting_format))
            .collect();

        let mut n_in_person = 0;
        let mut n_remote = 0;
        for &choice in &choices {
            assert!(
                meeting_format.allows(choice),
                "{} chosen in a {} meeting",
                choice,
                meeting_format
            );
            match choice {
                Attendance::InPerson => n_in_person += 1,
                Attendance::Remote => n_remote += 1,
                Attendance::Absent => {}
            }
        }

        let total_utility: f64 = self
            .agents
            .iter()
            .zip(&choices)
            .map(|(agent, &choice)| agent.compute_utility(n_in_person, n_remote, choice))
            .sum();
        let mean_utility = total_utility / self.agents.len() as f64;

        tracing::debug!(
            format = %meeting_format,
            estimate_in_person = self.in_person_estimate,
            estimate_remote = self.remote_estimate,
            n_in_person,
            n_remote,
            mean_utility,
            "meeting held"
        );

        self.in_person_estimate = n_in_person;
        self.remote_estimate = n_remote;

        MeetingOutcome {
            n_in_person,
            n_remote,
            mean_utility,
        }
    }

    /// Hold `n` meetings in order, charging the fixed cost to hybrid meetings.
    pub fn hold_meeting_sequence(&mut self, n: usize) -> MeetingSeries {
        let mut series = MeetingSeries::with_capacity(n);

        for _ in 0..n {
            let mut outcome = self.hold_meeting(self.meeting_format);
            if self.meeting_format == MeetingFormat::Hybrid {
                outcome.mean_utility -= self.hybrid_fixed_cost;
            }
            series.push(outcome);
        }

        series
    }
}
