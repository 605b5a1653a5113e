//! Cascading click model.
//!
//! The user scans a ranked list top to bottom and stops at the first arm whose latent
//! Bernoulli trial succeeds. Arms below the stop are never examined.
//!
//! Notes:
//! - The simulator is **seedable**: the random source is injected, and
//!   [`ClickSimulator::with_seed`] gives a reproducible default.
//! - The history log exists for auditing only; nothing in the learner reads it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Scenario;
use crate::error::{ConfigError, InvalidInputError};

/// Result of presenting one list to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickOutcome {
    /// The user stopped at this position (0-based).
    Click(usize),
    /// Every position was examined and none succeeded.
    NoClick,
}

impl ClickOutcome {
    /// Stop position, if any.
    pub fn position(self) -> Option<usize> {
        match self {
            ClickOutcome::Click(k) => Some(k),
            ClickOutcome::NoClick => None,
        }
    }

    pub fn is_click(self) -> bool {
        matches!(self, ClickOutcome::Click(_))
    }

    /// Number of leading positions of a `len`-long list the user examined.
    pub fn examined(self, len: usize) -> usize {
        match self {
            ClickOutcome::Click(k) => (k + 1).min(len),
            ClickOutcome::NoClick => len,
        }
    }
}

/// One audited presentation: the list shown and what happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub recommendation: Vec<usize>,
    pub outcome: ClickOutcome,
}

/// Run one cascade over `list` against `probabilities`.
///
/// Each examined position draws a fresh uniform value in `[0, 1)`; a draw strictly below
/// the arm's probability is a success. Arms outside `probabilities` never succeed.
pub fn sample_cascade<R: Rng>(
    rng: &mut R,
    probabilities: &[f64],
    list: &[usize],
) -> ClickOutcome {
    for (pos, &arm) in list.iter().enumerate() {
        let p = probabilities.get(arm).copied().unwrap_or(0.0);
        let u: f64 = rng.random();
        if u < p {
            return ClickOutcome::Click(pos);
        }
    }
    ClickOutcome::NoClick
}

/// Cascading user simulator over a fixed, hidden probability vector.
#[derive(Debug, Clone)]
pub struct ClickSimulator<R = StdRng> {
    probabilities: Vec<f64>,
    num_positions: usize,
    rng: R,
    record_history: bool,
    history: Vec<HistoryEntry>,
}

impl ClickSimulator<StdRng> {
    /// Create a simulator with a fixed seed (reproducible).
    pub fn with_seed(
        scenario: &Scenario,
        num_positions: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(scenario, num_positions, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ClickSimulator<R> {
    /// Create a simulator driven by an explicit random source.
    pub fn with_rng(scenario: &Scenario, num_positions: usize, rng: R) -> Result<Self, ConfigError> {
        if num_positions == 0 {
            return Err(ConfigError::ZeroPositions);
        }
        if num_positions > scenario.num_arms() {
            return Err(ConfigError::PositionsExceedArms {
                num_positions,
                num_arms: scenario.num_arms(),
            });
        }
        Ok(Self {
            probabilities: scenario.probabilities().to_vec(),
            num_positions,
            rng,
            record_history: true,
            history: Vec::new(),
        })
    }

    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    pub fn num_arms(&self) -> usize {
        self.probabilities.len()
    }

    /// Enable or disable the audit log (enabled by default).
    pub fn set_record_history(&mut self, on: bool) {
        self.record_history = on;
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Move the audit log out, leaving it empty.
    pub fn take_history(&mut self) -> Vec<HistoryEntry> {
        std::mem::take(&mut self.history)
    }

    /// Clear the audit log (e.g. before a new run). The RNG stream is not rewound.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Present `list` to the user.
    ///
    /// Fails if the list length differs from `num_positions` or names an unknown arm.
    pub fn recommend(&mut self, list: &[usize]) -> Result<ClickOutcome, InvalidInputError> {
        if list.len() != self.num_positions {
            return Err(InvalidInputError::RecommendationLength {
                expected: self.num_positions,
                actual: list.len(),
            });
        }
        if let Some(&arm) = list.iter().find(|&&a| a >= self.probabilities.len()) {
            return Err(InvalidInputError::ArmOutOfRange {
                arm,
                num_arms: self.probabilities.len(),
            });
        }
        let outcome = sample_cascade(&mut self.rng, &self.probabilities, list);
        if self.record_history {
            self.history.push(HistoryEntry {
                recommendation: list.to_vec(),
                outcome,
            });
        }
        Ok(outcome)
    }
}
