//! Explore-then-commit scheduler for the multi-player (joint-arm) variant.
//!
//! The arm universe is the Cartesian product of `P` players' individual choices, indexed
//! by [`JointArmCodec`]. The scheduler is an explicit state machine:
//!
//! ```text
//!   Explore { phase } --budget spent--> Commit { phase } --next round is 2^j--> Explore { phase + 1 }
//!          \                                   \
//!           `------------- T rounds done -------`------> Terminal
//! ```
//!
//! - **Explore** lasts `num_arms * phase` rounds. The window rotates over the candidate set
//!   and every player shows the same list to its own simulated user, updating only its own
//!   statistics. Before the list is shown, each player in turn checks it against bounds
//!   built from its own statistics; the first player that finds a dominated arm retires it
//!   from the shared candidate set. At most one arm goes per round.
//! - **Commit** builds a list from each player's top arms by empirical mean: position `n`
//!   takes player `p`'s digit from its `n`-th best joint arm. The list is held until the
//!   1-based index of the next round is a power of two (the doubling trick), and is not
//!   shown to users.
//!
//! The run stops the moment `T` rounds are done, whatever the phase, so the ledger has
//! exactly `T` entries.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::alloc::top_k_indices;
use crate::bounds::ConfidenceBoundEngine;
use crate::candidate::CandidateSetManager;
use crate::click::{ClickOutcome, ClickSimulator, HistoryEntry};
use crate::codec::JointArmCodec;
use crate::config::{JointScenario, SimulationConfig};
use crate::error::Result;
use crate::regret::RegretTracker;
use crate::round::{RoundNote, RoundRecord};
use crate::seed::derive_seed;
use crate::simulation::SimulationReport;
use crate::stats::ArmStatistics;

/// Scheduler state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Explore { phase: usize, remaining: usize },
    Commit { phase: usize, recommendation: Vec<usize> },
    Terminal,
}

/// One cooperating player: its own user simulator and its own statistics.
#[derive(Debug, Clone)]
struct Player {
    simulator: ClickSimulator<StdRng>,
    stats: ArmStatistics,
}

/// Drives the explore/commit cycle over a [`JointScenario`].
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    codec: JointArmCodec,
    probabilities: Vec<f64>,
    num_positions: usize,
    horizon: usize,
    engine: ConfidenceBoundEngine,
    candidates: CandidateSetManager,
    players: Vec<Player>,
    regret: RegretTracker,
    phase: Phase,
    round: usize,
    successes: u64,
    record_rounds: bool,
    rounds: Vec<RoundRecord>,
}

impl PhaseScheduler {
    pub fn new(scenario: &JointScenario, cfg: &SimulationConfig) -> Result<Self> {
        let num_arms = scenario.num_arms();
        cfg.validate(num_arms)?;
        let probabilities = scenario.scenario().probabilities().to_vec();

        let mut players = Vec::with_capacity(scenario.num_players());
        for p in 0..scenario.num_players() {
            let rng = StdRng::seed_from_u64(derive_seed(cfg.seed, p as u64));
            let mut simulator = ClickSimulator::with_rng(scenario.scenario(), cfg.num_positions, rng)?;
            simulator.set_record_history(cfg.record_history);
            players.push(Player {
                simulator,
                stats: ArmStatistics::new(num_arms),
            });
        }

        Ok(Self {
            codec: *scenario.codec(),
            regret: RegretTracker::for_scenario(&probabilities, cfg.num_positions),
            probabilities,
            num_positions: cfg.num_positions,
            horizon: cfg.horizon,
            engine: ConfidenceBoundEngine::new(cfg.horizon, cfg.exploration_c),
            candidates: CandidateSetManager::new(num_arms, cfg.num_positions)?,
            players,
            phase: Phase::Explore {
                phase: 1,
                remaining: num_arms,
            },
            round: 0,
            successes: 0,
            record_rounds: cfg.record_rounds,
            rounds: Vec::new(),
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Rounds completed so far.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn regret(&self) -> &RegretTracker {
        &self.regret
    }

    pub fn player_statistics(&self, player: usize) -> Option<&ArmStatistics> {
        self.players.get(player).map(|p| &p.stats)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Play one round. Returns `false` once the scheduler is terminal.
    pub fn step(&mut self) -> Result<bool> {
        self.advance_phase()?;
        match self.phase.clone() {
            Phase::Terminal => Ok(false),
            Phase::Explore { phase, remaining } => {
                self.explore_round(phase)?;
                self.phase = Phase::Explore {
                    phase,
                    remaining: remaining - 1,
                };
                Ok(true)
            }
            Phase::Commit {
                phase,
                recommendation,
            } => {
                self.finish_round(&recommendation, Vec::new(), vec![RoundNote::Commit { phase }]);
                Ok(true)
            }
        }
    }

    /// Run to the horizon.
    pub fn run(mut self) -> Result<SimulationReport> {
        while self.step()? {}
        tracing::info!(
            rounds = self.round,
            regret = self.regret.cumulative(),
            players = self.players.len(),
            "explore/commit run finished"
        );
        let history: Vec<HistoryEntry> = self
            .players
            .iter_mut()
            .flat_map(|p| p.simulator.take_history())
            .collect();
        Ok(SimulationReport {
            oracle_score: self.regret.oracle(),
            ledger: self.regret.into_ledger(),
            successes: self.successes,
            surviving_arms: self.candidates.candidates().as_slice().to_vec(),
            eliminated_arms: self.candidates.eliminated().to_vec(),
            rounds: self.rounds,
            history,
        })
    }

    /// Resolve transitions until the state is playable (or terminal).
    fn advance_phase(&mut self) -> Result<()> {
        loop {
            if self.round >= self.horizon {
                self.phase = Phase::Terminal;
            }
            match &self.phase {
                Phase::Terminal => return Ok(()),
                Phase::Explore {
                    phase,
                    remaining: 0,
                } => {
                    let phase = *phase;
                    let recommendation = self.commit_recommendation()?;
                    tracing::debug!(phase, round = self.round, ?recommendation, "entering commit");
                    self.phase = Phase::Commit {
                        phase,
                        recommendation,
                    };
                }
                Phase::Explore { .. } => return Ok(()),
                Phase::Commit { phase, .. } => {
                    if (self.round + 1).is_power_of_two() {
                        let phase = phase + 1;
                        let remaining = self.codec.size().saturating_mul(phase);
                        tracing::debug!(phase, round = self.round, remaining, "entering explore");
                        self.phase = Phase::Explore { phase, remaining };
                    } else {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn explore_round(&mut self, phase: usize) -> Result<()> {
        let mut recommendation = self.candidates.next_recommendation();
        let mut notes = vec![RoundNote::Explore { phase }];
        for (p, player) in self.players.iter().enumerate() {
            let bounds = self.engine.bounds(&player.stats);
            if let Some(e) = self.candidates.maybe_eliminate(&mut recommendation, &bounds) {
                tracing::debug!(
                    player = p,
                    arm = e.arm,
                    replacement = e.replacement,
                    dominated_by = e.dominated_by,
                    remaining = self.candidates.candidates().len(),
                    "eliminated dominated joint arm"
                );
                notes.push(RoundNote::Eliminated(e));
                break;
            }
        }
        let eliminated = notes.len() > 1;

        let mut outcomes = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            let outcome = player.simulator.recommend(&recommendation)?;
            player.stats.observe_cascade(&recommendation, outcome);
            outcomes.push(outcome);
        }
        self.successes += outcomes.iter().filter(|o| o.is_click()).count() as u64;
        self.candidates.rotate(eliminated);
        self.finish_round(&recommendation, outcomes, notes);
        Ok(())
    }

    fn finish_round(
        &mut self,
        recommendation: &[usize],
        outcomes: Vec<ClickOutcome>,
        notes: Vec<RoundNote>,
    ) {
        self.regret
            .record_recommendation(recommendation, &self.probabilities);
        self.round += 1;
        tracing::trace!(
            round = self.round,
            ?recommendation,
            regret = self.regret.cumulative(),
            "round"
        );
        if self.record_rounds {
            self.rounds.push(RoundRecord {
                round: self.round,
                recommendation: recommendation.to_vec(),
                outcomes,
                regret: self.regret.cumulative(),
                notes,
            });
        }
    }

    /// Per position `n`, combine every player's digit from its `n`-th best joint arm.
    fn commit_recommendation(&self) -> Result<Vec<usize>> {
        let mut digits = vec![Vec::with_capacity(self.players.len()); self.num_positions];
        for (p, player) in self.players.iter().enumerate() {
            let top = top_k_indices(&player.stats.means(), self.num_positions);
            for (n, &joint) in top.iter().enumerate() {
                digits[n].push(self.codec.digit(joint, p)?);
            }
        }
        let mut recommendation = Vec::with_capacity(self.num_positions);
        for d in &digits {
            recommendation.push(self.codec.encode(d)?);
        }
        Ok(recommendation)
    }
}
