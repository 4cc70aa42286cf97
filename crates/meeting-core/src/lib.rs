//! Core meeting dynamics: agents, attendance decisions, and the round recurrence.
//!
//! A [`MeetingSequence`] owns a fixed population of agents and a shared
//! attendance estimate. Each call to [`MeetingSequence::hold_meeting`] lets
//! every agent decide against last round's realized counts, tallies the
//! result, and feeds it back as the next estimate.
//!
//! # Modules
//!
//! - [`format`]: Meeting formats and attendance choices
//! - [`agent`]: Agent parameters and the [`Utility`] capability
//! - [`params`]: Sampling distributions and sequence construction parameters
//! - [`sequence`]: The meeting round recurrence
//! - [`error`]: Error types

pub mod agent;
pub mod error;
pub mod format;
pub mod params;
pub mod sequence;

pub use agent::{AgentParams, LinearAgent, LogAgent, Utility, UtilityRule};
pub use error::MeetingError;
pub use format::{Attendance, MeetingFormat};
pub use params::{NormalParams, SequenceParams, DEFAULT_HYBRID_FIXED_COST};
pub use sequence::{MeetingOutcome, MeetingSequence, MeetingSeries};
