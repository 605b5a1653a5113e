//! Single-player elimination learner.
//!
//! Each round:
//!
//! 1. bounds are computed from the statistics gathered so far;
//! 2. the window over the candidate set gives the list;
//! 3. the elimination rule may retire one dominated arm and patch the list;
//! 4. after the user responds, the examined prefix updates the statistics and the
//!    window rotates (or resets after an elimination).

use crate::bounds::{ConfidenceBoundEngine, ConfidenceBounds};
use crate::candidate::{CandidateSetManager, Elimination};
use crate::click::ClickOutcome;
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::round::{Decision, RoundNote};
use crate::stats::ArmStatistics;

/// Confidence-bound elimination over a rotating window.
#[derive(Debug, Clone)]
pub struct EliminationLearner {
    stats: ArmStatistics,
    engine: ConfidenceBoundEngine,
    candidates: CandidateSetManager,
    eliminated_this_round: bool,
    eliminations: Vec<Elimination>,
}

impl EliminationLearner {
    pub fn new(
        num_arms: usize,
        num_positions: usize,
        horizon: usize,
        exploration_c: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            stats: ArmStatistics::new(num_arms),
            engine: ConfidenceBoundEngine::new(horizon, exploration_c),
            candidates: CandidateSetManager::new(num_arms, num_positions)?,
            eliminated_this_round: false,
            eliminations: Vec::new(),
        })
    }

    /// Build from a run config, validating it against `num_arms`.
    pub fn from_config(num_arms: usize, cfg: &SimulationConfig) -> Result<Self, ConfigError> {
        cfg.validate(num_arms)?;
        Self::new(num_arms, cfg.num_positions, cfg.horizon, cfg.exploration_c)
    }

    pub fn statistics(&self) -> &ArmStatistics {
        &self.stats
    }

    pub fn candidates(&self) -> &CandidateSetManager {
        &self.candidates
    }

    /// Every elimination applied so far, in order.
    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    pub fn bounds(&self) -> Vec<ConfidenceBounds> {
        self.engine.bounds(&self.stats)
    }

    /// Choose this round's list, applying at most one elimination.
    pub fn decide(&mut self) -> Decision {
        let bounds = self.bounds();
        let mut arms = self.candidates.next_recommendation();
        match self.candidates.maybe_eliminate(&mut arms, &bounds) {
            Some(e) => {
                tracing::debug!(
                    arm = e.arm,
                    replacement = e.replacement,
                    dominated_by = e.dominated_by,
                    remaining = self.candidates.candidates().len(),
                    "eliminated dominated arm"
                );
                self.eliminated_this_round = true;
                self.eliminations.push(e);
                Decision::new(arms, RoundNote::Eliminated(e))
            }
            None => Decision::new(arms, RoundNote::Rotated),
        }
    }

    /// Fold the user's response into the statistics and move the window.
    pub fn update(&mut self, list: &[usize], outcome: ClickOutcome) {
        self.stats.observe_cascade(list, outcome);
        self.candidates.rotate(self.eliminated_this_round);
        self.eliminated_this_round = false;
    }
}
