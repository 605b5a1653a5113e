//! Per-round decision envelope and audit records.
//!
//! A [`Decision`] is what a policy returns for one round: the list to show plus typed
//! notes explaining how it was built. With `record_rounds` enabled, the simulation turns
//! each decision and its outcomes into a [`RoundRecord`] that downstream reporters can
//! print or plot.

use crate::candidate::Elimination;
use crate::click::ClickOutcome;

/// Audit notes attached to a round.
///
/// Notes are small, typed and stable. Prefer adding variants over changing existing ones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundNote {
    /// The window rotated over the candidate set with no elimination.
    Rotated,
    /// A dominated arm was retired and swapped out of this round's list.
    Eliminated(Elimination),
    /// Exploration round of the explore/commit scheduler.
    Explore { phase: usize },
    /// Committed round of the explore/commit scheduler.
    Commit { phase: usize },
    /// Non-adaptive list.
    Fixed,
}

/// A policy's choice for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub arms: Vec<usize>,
    pub notes: Vec<RoundNote>,
}

impl Decision {
    pub fn new(arms: Vec<usize>, note: RoundNote) -> Self {
        Self {
            arms,
            notes: vec![note],
        }
    }

    /// The elimination applied this round, if any.
    pub fn elimination(&self) -> Option<&Elimination> {
        self.notes.iter().find_map(|n| match n {
            RoundNote::Eliminated(e) => Some(e),
            _ => None,
        })
    }
}

/// Log-ready row for one simulated round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// 1-based round index.
    pub round: usize,
    pub recommendation: Vec<usize>,
    /// One outcome per simulated user (empty for committed rounds, which are not shown).
    pub outcomes: Vec<ClickOutcome>,
    /// Cumulative regret after this round.
    pub regret: f64,
    pub notes: Vec<RoundNote>,
}
