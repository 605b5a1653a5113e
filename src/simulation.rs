//! Simulation entry points.
//!
//! Every entry point validates its inputs before the first round and returns a
//! [`SimulationReport`] (or [`AgentScores`]) owned by the caller. Runs share no state:
//! each builds its own statistics, candidate set and seeded RNG, so independent runs can
//! be repeated and averaged freely.

use crate::click::{ClickSimulator, HistoryEntry};
use crate::config::{JointScenario, Scenario, SimulationConfig};
use crate::error::Result;
use crate::learner::EliminationLearner;
use crate::multi_agent::{AgentScores, IndependentAgents};
use crate::policy::CascadePolicy;
use crate::regret::{RegretLedger, RegretTracker};
use crate::round::RoundRecord;
use crate::scheduler::PhaseScheduler;
use crate::seed::derive_seed;

/// Everything a downstream reporter needs from one run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// Cumulative regret per round.
    pub ledger: RegretLedger,
    /// Best achievable per-round score under the true probabilities.
    pub oracle_score: f64,
    /// Number of simulated user sessions that ended in a click.
    pub successes: u64,
    /// Candidate set at the end of the run (empty for policies without one).
    pub surviving_arms: Vec<usize>,
    /// Arms retired by elimination, in order.
    pub eliminated_arms: Vec<usize>,
    /// Per-round records (only with `record_rounds`).
    pub rounds: Vec<RoundRecord>,
    /// Click simulator audit log (only with `record_history`).
    pub history: Vec<HistoryEntry>,
}

/// Drive `policy` for `cfg.horizon` rounds against `scenario`.
pub fn run_policy<P: CascadePolicy>(
    policy: &mut P,
    scenario: &Scenario,
    cfg: &SimulationConfig,
) -> Result<SimulationReport> {
    cfg.validate(scenario.num_arms())?;
    let mut simulator = ClickSimulator::with_seed(scenario, cfg.num_positions, cfg.seed)?;
    simulator.set_record_history(cfg.record_history);
    let mut regret = RegretTracker::for_scenario(scenario.probabilities(), cfg.num_positions);
    let mut report = SimulationReport {
        oracle_score: regret.oracle(),
        ..SimulationReport::default()
    };

    for round in 1..=cfg.horizon {
        let decision = policy.decide();
        let outcome = simulator.recommend(&decision.arms)?;
        policy.update(&decision.arms, outcome);
        if outcome.is_click() {
            report.successes += 1;
        }
        regret.record_recommendation(&decision.arms, scenario.probabilities());
        tracing::trace!(
            round,
            recommendation = ?decision.arms,
            ?outcome,
            regret = regret.cumulative(),
            "round"
        );
        if cfg.record_rounds {
            report.rounds.push(RoundRecord {
                round,
                recommendation: decision.arms,
                outcomes: vec![outcome],
                regret: regret.cumulative(),
                notes: decision.notes,
            });
        }
    }

    report.ledger = regret.into_ledger();
    report.history = simulator.take_history();
    Ok(report)
}

/// Single-player elimination run.
pub fn run_elimination(scenario: &Scenario, cfg: &SimulationConfig) -> Result<SimulationReport> {
    let mut learner = EliminationLearner::from_config(scenario.num_arms(), cfg)?;
    let mut report = run_policy(&mut learner, scenario, cfg)?;
    report.surviving_arms = learner.candidates().candidates().as_slice().to_vec();
    report.eliminated_arms = learner.candidates().eliminated().to_vec();
    tracing::info!(
        rounds = report.ledger.len(),
        regret = report.ledger.final_regret(),
        surviving = report.surviving_arms.len(),
        eliminated = report.eliminated_arms.len(),
        "elimination run finished"
    );
    Ok(report)
}

/// Multi-player explore/commit run over a joint arm space.
pub fn run_explore_commit(scenario: &JointScenario, cfg: &SimulationConfig) -> Result<SimulationReport> {
    PhaseScheduler::new(scenario, cfg)?.run()
}

/// Independent UCB players over a shared cascading user. Returns per-player success counts.
pub fn run_independent_agents(
    scenario: &Scenario,
    num_players: usize,
    cfg: &SimulationConfig,
) -> Result<AgentScores> {
    Ok(IndependentAgents::new(scenario, num_players, cfg)?.run())
}

/// Monte-Carlo repetitions of [`run_elimination`], each with its own derived seed.
pub fn run_repeated(
    scenario: &Scenario,
    cfg: &SimulationConfig,
    repetitions: usize,
) -> Result<Vec<SimulationReport>> {
    (0..repetitions)
        .map(|i| {
            let rep_cfg = SimulationConfig {
                seed: derive_seed(cfg.seed, i as u64),
                ..cfg.clone()
            };
            run_elimination(scenario, &rep_cfg)
        })
        .collect()
}
