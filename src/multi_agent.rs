//! Independent multi-agent variant.
//!
//! `P` players share one cascading user. Each round every player picks one arm by its
//! own UCB (untried arms first, ties to the lower index); the joint tuple is shown as a
//! cascade in player order, and the shared reward is 1 if anyone's arm succeeds. Every
//! player updates only its own statistics, for its own arm, with that shared reward.
//!
//! With `record_history`, every joint tuple and its cascade outcome is kept as a
//! [`HistoryEntry`], the same audit row the [`ClickSimulator`](crate::ClickSimulator) keeps.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::alloc::argmax_first;
use crate::bounds::ConfidenceBoundEngine;
use crate::click::{sample_cascade, HistoryEntry};
use crate::config::{Scenario, SimulationConfig};
use crate::error::{ConfigError, Result};
use crate::stats::ArmStatistics;

/// Final per-player results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentScores {
    /// Success count per player.
    pub scores: Vec<u64>,
    /// Each player's final statistics.
    pub statistics: Vec<ArmStatistics>,
    /// Joint tuples shown and their outcomes (only with `record_history`).
    pub history: Vec<HistoryEntry>,
}

/// Independent UCB players over a shared cascading user.
#[derive(Debug, Clone)]
pub struct IndependentAgents {
    probabilities: Vec<f64>,
    engine: ConfidenceBoundEngine,
    players: Vec<ArmStatistics>,
    scores: Vec<u64>,
    rng: StdRng,
    horizon: usize,
    round: usize,
    record_history: bool,
    history: Vec<HistoryEntry>,
}

impl IndependentAgents {
    /// `cfg.num_positions` is not used: the list length is the player count.
    pub fn new(scenario: &Scenario, num_players: usize, cfg: &SimulationConfig) -> Result<Self> {
        if num_players == 0 {
            return Err(ConfigError::NoPlayers.into());
        }
        if cfg.horizon == 0 {
            return Err(ConfigError::ZeroHorizon.into());
        }
        if !(cfg.exploration_c.is_finite() && cfg.exploration_c >= 0.0) {
            return Err(ConfigError::InvalidExplorationConstant(cfg.exploration_c).into());
        }
        let num_arms = scenario.num_arms();
        Ok(Self {
            probabilities: scenario.probabilities().to_vec(),
            engine: ConfidenceBoundEngine::new(cfg.horizon, cfg.exploration_c),
            players: vec![ArmStatistics::new(num_arms); num_players],
            scores: vec![0; num_players],
            rng: StdRng::seed_from_u64(cfg.seed),
            horizon: cfg.horizon,
            round: 0,
            record_history: cfg.record_history,
            history: Vec::new(),
        })
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Each player's UCB-maximizing arm, in player order.
    pub fn select(&self) -> Vec<usize> {
        self.players
            .iter()
            .map(|stats| {
                let ucb: Vec<f64> = self.engine.bounds(stats).iter().map(|b| b.ucb).collect();
                argmax_first(&ucb).unwrap_or(0)
            })
            .collect()
    }

    /// Play one round. Returns the joint arm and the shared reward, or `None` at the horizon.
    pub fn step(&mut self) -> Option<(Vec<usize>, bool)> {
        if self.round >= self.horizon {
            return None;
        }
        let joint = self.select();
        let outcome = sample_cascade(&mut self.rng, &self.probabilities, &joint);
        let reward = outcome.is_click();
        for (p, &arm) in joint.iter().enumerate() {
            self.players[p].update(arm, reward);
            if reward {
                self.scores[p] += 1;
            }
        }
        self.round += 1;
        tracing::trace!(round = self.round, ?joint, ?outcome, "round");
        if self.record_history {
            self.history.push(HistoryEntry {
                recommendation: joint.clone(),
                outcome,
            });
        }
        Some((joint, reward))
    }

    pub fn run(mut self) -> AgentScores {
        while self.step().is_some() {}
        tracing::info!(rounds = self.round, scores = ?self.scores, "independent agents finished");
        AgentScores {
            scores: self.scores,
            statistics: self.players,
            history: self.history,
        }
    }
}
