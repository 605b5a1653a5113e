//! `CascadePolicy`: the seam between a learner and the simulation loop.
//!
//! A policy produces one [`Decision`] per round and then receives the cascading outcome
//! of the list it chose. [`run_policy`](crate::run_policy) drives any implementation
//! against a scenario with regret accounting, so baselines and learners are measured the
//! same way.
//!
//! The explore/commit scheduler is not a `CascadePolicy`: it runs
//! several simulated users per round and has committed rounds that are never shown.
//! Use [`PhaseScheduler`](crate::PhaseScheduler) directly.

use crate::click::ClickOutcome;
use crate::learner::EliminationLearner;
use crate::round::{Decision, RoundNote};

/// Common interface for single-list cascading policies.
///
/// # Example
///
/// ```rust
/// use cascade::{run_policy, CascadePolicy, FixedPolicy, Scenario, SimulationConfig};
///
/// let scenario = Scenario::new(vec![0.1, 0.5, 0.9]).unwrap();
/// let cfg = SimulationConfig { horizon: 10, ..SimulationConfig::default() };
/// let mut fixed = FixedPolicy::new(vec![0]);
/// let report = run_policy(&mut fixed, &scenario, &cfg).unwrap();
/// assert!((report.ledger.final_regret() - 8.0).abs() < 1e-9);
/// ```
pub trait CascadePolicy {
    /// Choose this round's list.
    fn decide(&mut self) -> Decision;

    /// Observe the user's response to `list`.
    fn update(&mut self, list: &[usize], outcome: ClickOutcome);
}

impl CascadePolicy for EliminationLearner {
    fn decide(&mut self) -> Decision {
        self.decide()
    }
    fn update(&mut self, list: &[usize], outcome: ClickOutcome) {
        self.update(list, outcome);
    }
}

/// Always shows the same list. Useful as a regret baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPolicy {
    arms: Vec<usize>,
}

impl FixedPolicy {
    pub fn new(arms: Vec<usize>) -> Self {
        Self { arms }
    }
}

impl CascadePolicy for FixedPolicy {
    fn decide(&mut self) -> Decision {
        Decision::new(self.arms.clone(), RoundNote::Fixed)
    }
    fn update(&mut self, _list: &[usize], _outcome: ClickOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<P: CascadePolicy>(p: &mut P, rounds: usize) -> Vec<Vec<usize>> {
        let mut shown = Vec::new();
        for _ in 0..rounds {
            let d = p.decide();
            p.update(&d.arms, ClickOutcome::NoClick);
            shown.push(d.arms);
        }
        shown
    }

    #[test]
    fn fixed_policy_never_changes() {
        let mut p = FixedPolicy::new(vec![2, 0]);
        assert!(drive(&mut p, 5).iter().all(|l| l == &vec![2, 0]));
    }

    #[test]
    fn learner_implements_cascade_policy() {
        let mut l = EliminationLearner::new(4, 2, 50, 1.5).unwrap();
        let shown = drive(&mut l, 4);
        assert_eq!(shown[0], vec![0, 1]);
        assert_eq!(shown[3], vec![3, 0]);
    }
}
