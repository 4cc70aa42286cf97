//! Error types for meeting construction and configuration.

use thiserror::Error;

/// Errors raised while configuring or constructing a meeting sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeetingError {
    /// Meeting format string is not one of `hybrid`, `irl`, `online`
    #[error("invalid meeting format '{0}' (expected hybrid, irl or online)")]
    InvalidFormat(String),

    /// Utility rule string is not one of `linear`, `logarithmic`
    #[error("invalid utility rule '{0}' (expected linear or logarithmic)")]
    InvalidUtilityRule(String),

    /// A sequence needs at least one agent
    #[error("a meeting sequence needs at least one agent")]
    EmptyPopulation,

    /// A numeric parameter is out of range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl MeetingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MeetingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
