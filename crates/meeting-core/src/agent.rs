//! Agents
//!
//! An agent carries four fixed parameters and turns attendance counts into a
//! utility for each choice. How peer counts enter the utility is captured by
//! the [`Utility`] trait so the meeting recurrence never depends on a
//! particular curve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeetingError;
use crate::format::{Attendance, MeetingFormat};

/// Per-agent parameters - fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Marginal utility per peer attending in person
    pub sp: f64,
    /// Marginal utility per peer attending remotely
    pub sr: f64,
    /// Baseline utility of attending in person
    pub bp: f64,
    /// Baseline utility of attending remotely
    pub br: f64,
}

impl AgentParams {
    pub fn new(sp: f64, sr: f64, bp: f64, br: f64) -> Self {
        Self { sp, sr, bp, br }
    }
}

/// Utility capability shared by every agent variant.
pub trait Utility: fmt::Debug + Send {
    fn params(&self) -> &AgentParams;

    /// Utility of `attendance` when `n_in_person` peers attend in person and
    /// `n_remote` attend remotely. Not attending is always worth 0.
    fn compute_utility(&self, n_in_person: usize, n_remote: usize, attendance: Attendance) -> f64;

    /// Decide how to attend the upcoming meeting given estimated counts.
    ///
    /// Under `Hybrid`, in-person wins only with a strictly larger utility;
    /// a tie falls through to the remote check.
    fn attends(
        &self,
        in_person_estimate: usize,
        remote_estimate: usize,
        format: MeetingFormat,
    ) -> Attendance {
        match format {
            MeetingFormat::Irl => {
                let u_in_person =
                    self.compute_utility(in_person_estimate, remote_estimate, Attendance::InPerson);
                if u_in_person > 0.0 {
                    Attendance::InPerson
                } else {
                    Attendance::Absent
                }
            }
            MeetingFormat::Online => {
                let u_remote =
                    self.compute_utility(in_person_estimate, remote_estimate, Attendance::Remote);
                if u_remote > 0.0 {
                    Attendance::Remote
                } else {
                    Attendance::Absent
                }
            }
            MeetingFormat::Hybrid => {
                let u_in_person =
                    self.compute_utility(in_person_estimate, remote_estimate, Attendance::InPerson);
                let u_remote =
                    self.compute_utility(in_person_estimate, remote_estimate, Attendance::Remote);

                if u_in_person > u_remote && u_in_person > 0.0 {
                    Attendance::InPerson
                } else if u_remote > 0.0 {
                    Attendance::Remote
                } else {
                    Attendance::Absent
                }
            }
        }
    }
}

/// Utility grows linearly with the number of peers: `B + s * N`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAgent {
    params: AgentParams,
}

impl LinearAgent {
    pub fn new(params: AgentParams) -> Self {
        Self { params }
    }
}

impl Utility for LinearAgent {
    fn params(&self) -> &AgentParams {
        &self.params
    }

    fn compute_utility(&self, n_in_person: usize, n_remote: usize, attendance: Attendance) -> f64 {
        let p = &self.params;
        match attendance {
            Attendance::InPerson => p.bp + p.sp * n_in_person as f64,
            Attendance::Remote => p.br + p.sr * n_remote as f64,
            Attendance::Absent => 0.0,
        }
    }
}

/// Utility grows with the logarithm of the number of peers: `B + s * ln(N)`.
///
/// With no peers in a mode the utility of that mode is `f64::NEG_INFINITY`,
/// so an empty mode is never chosen. A realized count always includes the
/// agent itself, so realized utilities stay finite.
#[derive(Debug, Clone, PartialEq)]
pub struct LogAgent {
    params: AgentParams,
}

impl LogAgent {
    pub fn new(params: AgentParams) -> Self {
        Self { params }
    }
}

fn log_peer_term(sensitivity: f64, peers: usize) -> f64 {
    if peers == 0 {
        f64::NEG_INFINITY
    } else {
        sensitivity * (peers as f64).ln()
    }
}

impl Utility for LogAgent {
    fn params(&self) -> &AgentParams {
        &self.params
    }

    fn compute_utility(&self, n_in_person: usize, n_remote: usize, attendance: Attendance) -> f64 {
        let p = &self.params;
        match attendance {
            Attendance::InPerson => p.bp + log_peer_term(p.sp, n_in_person),
            Attendance::Remote => p.br + log_peer_term(p.sr, n_remote),
            Attendance::Absent => 0.0,
        }
    }
}

/// Which [`Utility`] implementation agents are built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UtilityRule {
    #[default]
    Linear,
    Logarithmic,
}

impl UtilityRule {
    pub fn build(&self, params: AgentParams) -> Box<dyn Utility> {
        match self {
            UtilityRule::Linear => Box::new(LinearAgent::new(params)),
            UtilityRule::Logarithmic => Box::new(LogAgent::new(params)),
        }
    }
}

impl fmt::Display for UtilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilityRule::Linear => f.write_str("linear"),
            UtilityRule::Logarithmic => f.write_str("logarithmic"),
        }
    }
}

impl FromStr for UtilityRule {
    type Err = MeetingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(UtilityRule::Linear),
            "logarithmic" | "log" => Ok(UtilityRule::Logarithmic),
            other => Err(MeetingError::InvalidUtilityRule(other.to_string())),
        }
    }
}

impl TryFrom<String> for UtilityRule {
    type Error = MeetingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
