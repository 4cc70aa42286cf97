//! Sequence Parameters
//!
//! Everything needed to construct a [`MeetingSequence`](crate::MeetingSequence):
//! population size, format, fixed cost, and the normal distributions agent
//! parameters are drawn from.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::agent::{AgentParams, UtilityRule};
use crate::error::MeetingError;
use crate::format::MeetingFormat;

/// Coordination overhead subtracted from hybrid meetings' mean utility
pub const DEFAULT_HYBRID_FIXED_COST: f64 = 10.0;

/// A `(mean, std_dev)` pair for a normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// A degenerate distribution that always yields `value`
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    fn distribution(&self, name: &'static str) -> Result<Normal<f64>, MeetingError> {
        if !self.mean.is_finite() {
            return Err(MeetingError::invalid(name, format!("mean {} is not finite", self.mean)));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(MeetingError::invalid(
                name,
                format!("std_dev {} must be finite and non-negative", self.std_dev),
            ));
        }
        Normal::new(self.mean, self.std_dev).map_err(|e| MeetingError::invalid(name, e.to_string()))
    }
}

impl From<(f64, f64)> for NormalParams {
    fn from((mean, std_dev): (f64, f64)) -> Self {
        Self::new(mean, std_dev)
    }
}

/// Construction parameters for a meeting sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceParams {
    /// Population size
    pub n_agents: usize,
    /// Format shared by every meeting in the sequence
    pub meeting_format: MeetingFormat,
    /// How peer counts enter an agent's utility
    pub utility: UtilityRule,
    /// Subtracted from each hybrid meeting's mean utility
    pub hybrid_fixed_cost: f64,
    /// Distribution of the per-peer in-person sensitivity
    pub sp: NormalParams,
    /// Distribution of the per-peer remote sensitivity
    pub sr: NormalParams,
    /// Distribution of the in-person baseline
    pub bp: NormalParams,
    /// Distribution of the remote baseline
    pub br: NormalParams,
}

impl Default for SequenceParams {
    fn default() -> Self {
        Self {
            n_agents: 20,
            meeting_format: MeetingFormat::Hybrid,
            utility: UtilityRule::Linear,
            hybrid_fixed_cost: DEFAULT_HYBRID_FIXED_COST,
            sp: NormalParams::new(1.0, 0.5),
            sr: NormalParams::new(0.5, 0.25),
            bp: NormalParams::new(-10.0, 5.0),
            br: NormalParams::new(-2.0, 1.0),
        }
    }
}

impl SequenceParams {
    /// Check every parameter without drawing anything.
    pub fn validate(&self) -> Result<(), MeetingError> {
        self.sampler().map(|_| ())
    }

    /// Draw one agent's parameters. Each parameter comes from its own
    /// independent distribution, in the order `sp`, `sr`, `bp`, `br`.
    pub fn sample_agent<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AgentParams, MeetingError> {
        Ok(self.sampler()?.sample(rng))
    }

    pub(crate) fn sampler(&self) -> Result<AgentSampler, MeetingError> {
        if self.n_agents == 0 {
            return Err(MeetingError::EmptyPopulation);
        }
        if !self.hybrid_fixed_cost.is_finite() {
            return Err(MeetingError::invalid(
                "hybrid_fixed_cost",
                format!("{} is not finite", self.hybrid_fixed_cost),
            ));
        }

        Ok(AgentSampler {
            sp: self.sp.distribution("sp")?,
            sr: self.sr.distribution("sr")?,
            bp: self.bp.distribution("bp")?,
            br: self.br.distribution("br")?,
        })
    }
}

/// Validated distributions, ready to draw agents from
#[derive(Debug, Clone, Copy)]
pub(crate) struct AgentSampler {
    sp: Normal<f64>,
    sr: Normal<f64>,
    bp: Normal<f64>,
    br: Normal<f64>,
}

impl AgentSampler {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> AgentParams {
        AgentParams {
            sp: self.sp.sample(rng),
            sr: self.sr.sample(rng),
            bp: self.bp.sample(rng),
            br: self.br.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_params_are_valid() {
        let params = SequenceParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.hybrid_fixed_cost, 10.0);
        assert!(params.sp.mean > params.sr.mean && params.sr.mean > 0.0);
        assert!(params.bp.mean < params.br.mean && params.br.mean < 0.0);
    }

    #[test]
    fn test_zero_agents_rejected() {
        let params = SequenceParams {
            n_agents: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(MeetingError::EmptyPopulation));
    }

    #[test]
    fn test_bad_distribution_rejected() {
        let params = SequenceParams {
            sr: NormalParams::new(0.5, -1.0),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(MeetingError::InvalidParameter { name: "sr", .. })
        ));

        let params = SequenceParams {
            bp: NormalParams::new(f64::NAN, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(MeetingError::InvalidParameter { name: "bp", .. })
        ));

        let params = SequenceParams {
            hybrid_fixed_cost: f64::INFINITY,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_fixed_distribution_samples_exact_value() {
        let params = SequenceParams {
            sp: NormalParams::fixed(1.5),
            sr: NormalParams::fixed(0.0),
            bp: NormalParams::fixed(-4.0),
            br: NormalParams::fixed(2.0),
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(7);

        let agent = params.sample_agent(&mut rng).unwrap();
        assert_eq!(agent, AgentParams::new(1.5, 0.0, -4.0, 2.0));
    }

    #[test]
    fn test_sampling_is_seeded() {
        let params = SequenceParams::default();

        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);
        let draws1: Vec<_> = (0..20).map(|_| params.sample_agent(&mut rng1).unwrap()).collect();
        let draws2: Vec<_> = (0..20).map(|_| params.sample_agent(&mut rng2).unwrap()).collect();

        assert_eq!(draws1, draws2);
    }

    #[test]
    fn test_params_from_toml() {
        let params: SequenceParams = toml::from_str(
            r#"
            n_agents = 5
            meeting_format = "irl"
            utility = "logarithmic"
            sp = { mean = 2.0, std_dev = 0.1 }
            "#,
        )
        .unwrap();

        assert_eq!(params.n_agents, 5);
        assert_eq!(params.meeting_format, MeetingFormat::Irl);
        assert_eq!(params.utility, UtilityRule::Logarithmic);
        assert_eq!(params.sp, NormalParams::new(2.0, 0.1));
        // Unspecified fields keep their defaults
        assert_eq!(params.br, SequenceParams::default().br);
    }

    #[test]
    fn test_unknown_format_in_toml_fails() {
        let parsed: Result<SequenceParams, _> = toml::from_str("meeting_format = \"zoom\"");
        assert!(parsed.is_err());
    }
}
