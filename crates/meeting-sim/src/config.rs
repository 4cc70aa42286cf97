//! Configuration loading for simulation runs.
//!
//! A run is described by a TOML file with a `[sequence]` section (how each
//! trial's population is built) and a `[run]` section (how many trials and
//! meetings, which seed, where to write results).

use meeting_core::SequenceParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    /// Population and meeting parameters for each trial
    #[serde(default)]
    pub sequence: SequenceParams,
    /// Run size and output settings
    #[serde(default)]
    pub run: RunConfig,
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks sequence parameters and run sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sequence.validate()?;
        if self.run.n_sims == 0 {
            return Err(ConfigError::Invalid("run.n_sims must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Run size and output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Independent trials, each with a freshly sampled population
    pub n_sims: usize,
    /// Meetings held per trial
    pub n_meetings: usize,
    /// Seed for the parameter sampler
    pub seed: u64,
    /// Directory for `rounds.jsonl` and `summary.json`
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_sims: 1000,
            n_meetings: 10,
            seed: 42,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Returns the default configuration as a TOML string.
pub fn default_config_toml() -> Result<String, ConfigError> {
    SimConfig::default().to_toml()
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error serializing config to TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Sequence parameters rejected by the core
    #[error(transparent)]
    Meeting(#[from] meeting_core::MeetingError),

    /// Run settings out of range
    #[error("invalid run settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeting_core::{MeetingFormat, NormalParams, UtilityRule};

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.run.n_sims, 1000);
        assert_eq!(config.run.n_meetings, 10);
        assert_eq!(config.sequence.hybrid_fixed_cost, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_toml_parses_back() {
        let toml = default_config_toml().unwrap();
        let parsed = SimConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, SimConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = SimConfig::from_str(
            r#"
            [sequence]
            n_agents = 8
            meeting_format = "online"
            utility = "logarithmic"
            br = { mean = 1.0, std_dev = 0.0 }

            [run]
            n_sims = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.sequence.n_agents, 8);
        assert_eq!(config.sequence.meeting_format, MeetingFormat::Online);
        assert_eq!(config.sequence.utility, UtilityRule::Logarithmic);
        assert_eq!(config.sequence.br, NormalParams::fixed(1.0));
        assert_eq!(config.run.n_sims, 3);
        assert_eq!(config.run.n_meetings, 10);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = SimConfig::from_str("[sequence]\nmeeting_format = \"carrier-pigeon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn test_zero_agents_rejected() {
        let err = SimConfig::from_str("[sequence]\nn_agents = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Meeting(_)));
    }

    #[test]
    fn test_zero_sims_rejected() {
        let err = SimConfig::from_str("[run]\nn_sims = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
