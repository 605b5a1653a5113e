//! Run configuration and scenarios.
//!
//! Start with [`SimulationConfig::default()`] and override fields with struct update
//! syntax. Scenarios validate their probability vectors on construction, so a run never
//! starts on bad inputs.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::codec::JointArmCodec;
use crate::error::ConfigError;
use crate::DEFAULT_EXPLORATION_C;

/// Per-run parameters shared by every simulation entry point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Length of every recommended list.
    pub num_positions: usize,
    /// Total round budget `T`. Also the look-ahead constant inside the confidence radius.
    pub horizon: usize,
    /// Exploration constant `c` in `sqrt(c · ln T / n)`.
    pub exploration_c: f64,
    /// Seed for the run. Player and repetition streams are derived from it.
    pub seed: u64,
    /// Keep a [`RoundRecord`](crate::RoundRecord) per round in the report.
    pub record_rounds: bool,
    /// Keep the click simulator's audit log in the report.
    pub record_history: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_positions: 1,
            horizon: 1_000,
            exploration_c: DEFAULT_EXPLORATION_C,
            seed: 0,
            record_rounds: false,
            record_history: false,
        }
    }
}

impl SimulationConfig {
    /// Check this config against an arm universe of `num_arms` arms.
    pub fn validate(&self, num_arms: usize) -> Result<(), ConfigError> {
        if num_arms == 0 {
            return Err(ConfigError::EmptyScenario);
        }
        if self.num_positions == 0 {
            return Err(ConfigError::ZeroPositions);
        }
        if self.num_positions > num_arms {
            return Err(ConfigError::PositionsExceedArms {
                num_positions: self.num_positions,
                num_arms,
            });
        }
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if !(self.exploration_c.is_finite() && self.exploration_c >= 0.0) {
            return Err(ConfigError::InvalidExplorationConstant(self.exploration_c));
        }
        Ok(())
    }
}

/// How to draw a hidden probability vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioGenerator {
    /// Each arm uniform on `[0, 1]`.
    #[default]
    Uniform,
    /// Each arm drawn from `Beta(alpha, beta)`. Small means model sparse click-through.
    Beta { alpha: f64, beta: f64 },
}

impl ScenarioGenerator {
    pub fn sample<R: Rng>(&self, num_arms: usize, rng: &mut R) -> Result<Vec<f64>, ConfigError> {
        match *self {
            ScenarioGenerator::Uniform => Ok((0..num_arms)
                .map(|_| rng.random_range(0.0..=1.0))
                .collect()),
            ScenarioGenerator::Beta { alpha, beta } => {
                let dist = Beta::new(alpha, beta).map_err(|_| {
                    ConfigError::Generator("beta parameters must be finite and positive")
                })?;
                Ok((0..num_arms).map(|_| dist.sample(rng)).collect())
            }
        }
    }
}

/// A validated hidden probability vector, one entry per arm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Scenario {
    probabilities: Vec<f64>,
}

impl Scenario {
    /// Fails if the vector is empty or any value is outside `[0, 1]`.
    pub fn new(probabilities: Vec<f64>) -> Result<Self, ConfigError> {
        if probabilities.is_empty() {
            return Err(ConfigError::EmptyScenario);
        }
        for (arm, &value) in probabilities.iter().enumerate() {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ConfigError::ProbabilityOutOfRange { arm, value });
            }
        }
        Ok(Self { probabilities })
    }

    /// Draw a scenario of `num_arms` arms.
    pub fn generate<R: Rng>(
        num_arms: usize,
        generator: ScenarioGenerator,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        Self::new(generator.sample(num_arms, rng)?)
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn num_arms(&self) -> usize {
        self.probabilities.len()
    }
}

impl TryFrom<Vec<f64>> for Scenario {
    type Error = ConfigError;

    fn try_from(probabilities: Vec<f64>) -> Result<Self, Self::Error> {
        Scenario::new(probabilities)
    }
}

impl From<Scenario> for Vec<f64> {
    fn from(s: Scenario) -> Self {
        s.probabilities
    }
}

/// A scenario over the Cartesian product of per-player choices.
///
/// `probabilities` is indexed by joint arm (see [`JointArmCodec`]) and must have exactly
/// `radix^num_players` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "JointScenarioRepr", into = "JointScenarioRepr")
)]
pub struct JointScenario {
    codec: JointArmCodec,
    scenario: Scenario,
}

impl JointScenario {
    pub fn new(num_players: usize, radix: usize, probabilities: Vec<f64>) -> Result<Self, ConfigError> {
        let codec = JointArmCodec::new(num_players, radix)?;
        if probabilities.len() != codec.size() {
            return Err(ConfigError::ProbabilityCountMismatch {
                expected: codec.size(),
                actual: probabilities.len(),
            });
        }
        Ok(Self {
            codec,
            scenario: Scenario::new(probabilities)?,
        })
    }

    pub fn generate<R: Rng>(
        num_players: usize,
        radix: usize,
        generator: ScenarioGenerator,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let codec = JointArmCodec::new(num_players, radix)?;
        Self::new(num_players, radix, generator.sample(codec.size(), rng)?)
    }

    pub fn codec(&self) -> &JointArmCodec {
        &self.codec
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn num_players(&self) -> usize {
        self.codec.num_players()
    }

    pub fn num_arms(&self) -> usize {
        self.codec.size()
    }
}

/// Flat serde form of a [`JointScenario`]; deserialization revalidates through
/// [`JointScenario::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct JointScenarioRepr {
    num_players: usize,
    radix: usize,
    probabilities: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<JointScenarioRepr> for JointScenario {
    type Error = ConfigError;

    fn try_from(r: JointScenarioRepr) -> Result<Self, Self::Error> {
        JointScenario::new(r.num_players, r.radix, r.probabilities)
    }
}

#[cfg(feature = "serde")]
impl From<JointScenario> for JointScenarioRepr {
    fn from(j: JointScenario) -> Self {
        Self {
            num_players: j.num_players(),
            radix: j.codec.radix(),
            probabilities: j.scenario.into(),
        }
    }
}
