//! Regret accounting against the oracle.
//!
//! The score of a list is the probability that the user succeeds somewhere on it:
//!
//! ```text
//!   score(list) = 1 - Π_{arm ∈ list} (1 - p_arm)
//! ```
//!
//! The oracle shows the `num_positions` arms with the highest true probabilities. Both
//! scores always use the hidden probabilities, never the learner's estimates.

use crate::TIEBREAK_EPS;

/// `1 - Π(1 - p)` over the given probabilities.
pub fn cascade_success_probability<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let miss: f64 = probabilities
        .into_iter()
        .map(|p| 1.0 - p.clamp(0.0, 1.0))
        .product();
    1.0 - miss
}

/// Best achievable score with `num_positions` slots.
///
/// Depends only on the multiset of the top values, so any permutation of
/// `probabilities` gives the same result.
pub fn oracle_score(probabilities: &[f64], num_positions: usize) -> f64 {
    let mut sorted = probabilities.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    cascade_success_probability(sorted.into_iter().take(num_positions))
}

/// Score of the list actually shown. Unknown arms contribute nothing.
pub fn achieved_score(recommendation: &[usize], probabilities: &[f64]) -> f64 {
    cascade_success_probability(
        recommendation
            .iter()
            .map(|&arm| probabilities.get(arm).copied().unwrap_or(0.0)),
    )
}

/// Cumulative regret, one entry per round. Never decreases.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegretLedger {
    values: Vec<f64>,
}

impl RegretLedger {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Cumulative regret after the last round (0 for an empty ledger).
    pub fn final_regret(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    fn push(&mut self, v: f64) {
        self.values.push(v);
    }
}

/// Running regret for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RegretTracker {
    oracle: f64,
    cumulative: f64,
    ledger: RegretLedger,
}

impl RegretTracker {
    pub fn new(oracle: f64) -> Self {
        Self {
            oracle,
            cumulative: 0.0,
            ledger: RegretLedger::default(),
        }
    }

    /// Tracker whose oracle is computed from the true probabilities.
    pub fn for_scenario(probabilities: &[f64], num_positions: usize) -> Self {
        Self::new(oracle_score(probabilities, num_positions))
    }

    pub fn oracle(&self) -> f64 {
        self.oracle
    }

    pub fn cumulative(&self) -> f64 {
        self.cumulative
    }

    pub fn ledger(&self) -> &RegretLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> RegretLedger {
        self.ledger
    }

    /// Record one round with the given achieved score. Returns that round's regret.
    ///
    /// A score above the oracle (possible when a list repeats an arm) counts as zero.
    pub fn record(&mut self, achieved: f64) -> f64 {
        let gap = self.oracle - achieved;
        if gap < -TIEBREAK_EPS {
            tracing::warn!(
                oracle = self.oracle,
                achieved,
                "achieved score exceeds oracle; clamping round regret to zero"
            );
        }
        let regret = gap.max(0.0);
        self.cumulative += regret;
        self.ledger.push(self.cumulative);
        regret
    }

    /// Record one round from the list shown and the true probabilities.
    pub fn record_recommendation(&mut self, recommendation: &[usize], probabilities: &[f64]) -> f64 {
        self.record(achieved_score(recommendation, probabilities))
    }
}

/// Pointwise mean of several ledgers, truncated to the shortest.
pub fn average_regret(ledgers: &[RegretLedger]) -> Vec<f64> {
    let Some(len) = ledgers.iter().map(RegretLedger::len).min() else {
        return Vec::new();
    };
    let n = ledgers.len() as f64;
    (0..len)
        .map(|t| ledgers.iter().map(|l| l.values[t]).sum::<f64>() / n)
        .collect()
}
