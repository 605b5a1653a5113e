//! Error taxonomy.
//!
//! Two kinds of failure exist:
//! - [`ConfigError`]: the run's inputs are unusable. Detected before any round executes.
//! - [`InvalidInputError`]: a call received a malformed argument. From inside the engine
//!   this indicates a broken internal invariant, not a user mistake.
//!
//! Zero-observation arms are not an error: they map to infinite confidence bounds.

use thiserror::Error;

/// Setup-time failures. Fatal: the run does not start.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("num_positions ({num_positions}) exceeds num_arms ({num_arms})")]
    PositionsExceedArms { num_positions: usize, num_arms: usize },
    #[error("num_positions must be at least 1")]
    ZeroPositions,
    #[error("horizon must be at least 1 round")]
    ZeroHorizon,
    #[error("scenario has no arms")]
    EmptyScenario,
    #[error("probability for arm {arm} is {value}, expected a finite value in [0, 1]")]
    ProbabilityOutOfRange { arm: usize, value: f64 },
    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExplorationConstant(f64),
    #[error("expected {expected} joint probabilities, got {actual}")]
    ProbabilityCountMismatch { expected: usize, actual: usize },
    #[error("at least one player is required")]
    NoPlayers,
    #[error("radix must be at least 1")]
    ZeroRadix,
    #[error("joint arm space {radix}^{num_players} overflows usize")]
    JointSpaceOverflow { radix: usize, num_players: usize },
    #[error("scenario generator parameters are invalid: {0}")]
    Generator(&'static str),
}

/// Call-time failures on malformed arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("recommendation has {actual} arms, expected {expected}")]
    RecommendationLength { expected: usize, actual: usize },
    #[error("arm {arm} is out of range for {num_arms} arms")]
    ArmOutOfRange { arm: usize, num_arms: usize },
    #[error("joint arm has {actual} digits, expected {expected}")]
    DigitCount { expected: usize, actual: usize },
    #[error("digit {digit} at player {player} is not below radix {radix}")]
    DigitOutOfRange {
        player: usize,
        digit: usize,
        radix: usize,
    },
    #[error("joint index {index} is not below {size}")]
    JointIndexOutOfRange { index: usize, size: usize },
}

/// Crate-level error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

pub type Result<T> = std::result::Result<T, Error>;
