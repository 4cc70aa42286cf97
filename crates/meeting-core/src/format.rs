//! Meeting Formats
//!
//! The format of a meeting constrains which attendance choices are legal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeetingError;

/// How a meeting can be attended. Fixed for the lifetime of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MeetingFormat {
    /// Both in-person and remote attendance are possible
    #[default]
    Hybrid,
    /// In-person only
    Irl,
    /// Remote only
    Online,
}

impl MeetingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingFormat::Hybrid => "hybrid",
            MeetingFormat::Irl => "irl",
            MeetingFormat::Online => "online",
        }
    }

    /// Estimate `(in_person, remote)` used before the first meeting.
    ///
    /// Online meetings start out expecting everybody remote, every other
    /// format starts out expecting everybody in person.
    pub fn initial_estimate(&self, n_agents: usize) -> (usize, usize) {
        match self {
            MeetingFormat::Online => (0, n_agents),
            MeetingFormat::Hybrid | MeetingFormat::Irl => (n_agents, 0),
        }
    }

    /// Whether `attendance` is a legal choice under this format.
    pub fn allows(&self, attendance: Attendance) -> bool {
        match (self, attendance) {
            (_, Attendance::Absent) => true,
            (MeetingFormat::Hybrid, _) => true,
            (MeetingFormat::Irl, Attendance::InPerson) => true,
            (MeetingFormat::Online, Attendance::Remote) => true,
            _ => false,
        }
    }
}

impl fmt::Display for MeetingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingFormat {
    type Err = MeetingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hybrid" => Ok(MeetingFormat::Hybrid),
            "irl" => Ok(MeetingFormat::Irl),
            "online" => Ok(MeetingFormat::Online),
            other => Err(MeetingError::InvalidFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for MeetingFormat {
    type Error = MeetingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One agent's choice for a single meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attendance {
    InPerson,
    Remote,
    /// Did not attend
    Absent,
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Attendance::InPerson => "in-person",
            Attendance::Remote => "remote",
            Attendance::Absent => "absent",
        };
        f.write_str(s)
    }
}
