//! Candidate set and rotating recommendation window.
//!
//! [`CandidateSet`] is the ordered set of arms still considered viable. Membership is a
//! per-arm flag (O(1) lookups) and iteration follows insertion order. Arms only ever
//! leave the set.
//!
//! [`CandidateSetManager`] keeps `num_positions` offsets into the set (the window) and
//! applies the elimination rule:
//!
//! - A recommended arm `rec` is **dominated** when at least `num_positions` candidates
//!   `other` satisfy `UCB(rec) < LCB(other)`.
//! - The first dominated arm in position order is removed and swapped for the next
//!   candidate in rotation. At most one elimination per round.
//! - Eliminations stop once only `num_positions` candidates remain.
//!
//! Between rounds the window advances by one (modulo the set size), so every survivor
//! rotates through every slot. After an elimination it resets to `[0, num_positions)`.

use crate::bounds::ConfidenceBounds;
use crate::error::ConfigError;

/// Ordered arm set with constant-time membership.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSet {
    order: Vec<usize>,
    member: Vec<bool>,
}

impl CandidateSet {
    /// All arms `0..num_arms`, in index order.
    pub fn new(num_arms: usize) -> Self {
        Self {
            order: (0..num_arms).collect(),
            member: vec![true; num_arms],
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, arm: usize) -> bool {
        self.member.get(arm).copied().unwrap_or(false)
    }

    /// Arm at `offset` in iteration order.
    pub fn get(&self, offset: usize) -> Option<usize> {
        self.order.get(offset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Retire `arm`. Returns `false` if it was not a member.
    pub fn remove(&mut self, arm: usize) -> bool {
        if !self.contains(arm) {
            return false;
        }
        self.member[arm] = false;
        self.order.retain(|&a| a != arm);
        true
    }
}

/// One applied elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Elimination {
    /// The retired arm.
    pub arm: usize,
    /// Position it held in the recommendation.
    pub position: usize,
    /// Arm shown in its place this round.
    pub replacement: usize,
    /// Number of candidates that confidently beat it.
    pub dominated_by: usize,
}

/// Owns the candidate set and the recommendation window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSetManager {
    set: CandidateSet,
    offsets: Vec<usize>,
    num_positions: usize,
    eliminated: Vec<usize>,
}

impl CandidateSetManager {
    pub fn new(num_arms: usize, num_positions: usize) -> Result<Self, ConfigError> {
        if num_arms == 0 {
            return Err(ConfigError::EmptyScenario);
        }
        if num_positions == 0 {
            return Err(ConfigError::ZeroPositions);
        }
        if num_positions > num_arms {
            return Err(ConfigError::PositionsExceedArms {
                num_positions,
                num_arms,
            });
        }
        Ok(Self {
            set: CandidateSet::new(num_arms),
            offsets: (0..num_positions).collect(),
            num_positions,
            eliminated: Vec::new(),
        })
    }

    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.set
    }

    /// Current window offsets into the candidate set.
    pub fn current_order(&self) -> &[usize] {
        &self.offsets
    }

    /// Retired arms, in elimination order.
    pub fn eliminated(&self) -> &[usize] {
        &self.eliminated
    }

    /// The arms under the current window.
    pub fn next_recommendation(&self) -> Vec<usize> {
        self.offsets
            .iter()
            .filter_map(|&o| self.set.get(o))
            .collect()
    }

    /// Apply the elimination rule to `recommendation` (as returned by
    /// [`next_recommendation`](Self::next_recommendation)).
    ///
    /// `bounds` is indexed by arm; arms missing from it count as unobserved. On
    /// elimination, `recommendation` is patched in place with the replacement arm.
    pub fn maybe_eliminate(
        &mut self,
        recommendation: &mut [usize],
        bounds: &[ConfidenceBounds],
    ) -> Option<Elimination> {
        if self.set.len() <= self.num_positions {
            return None;
        }
        let bound_of = |arm: usize| {
            bounds
                .get(arm)
                .copied()
                .unwrap_or(ConfidenceBounds::UNOBSERVED)
        };

        for position in 0..recommendation.len() {
            let rec = recommendation[position];
            let rec_bounds = bound_of(rec);
            let dominated_by = self
                .set
                .iter()
                .filter(|&other| rec_bounds.dominated_by(&bound_of(other)))
                .count();
            if dominated_by < self.num_positions {
                continue;
            }
            let Some(replacement) = self.next_in_rotation(recommendation) else {
                continue;
            };
            self.set.remove(rec);
            self.eliminated.push(rec);
            recommendation[position] = replacement;
            return Some(Elimination {
                arm: rec,
                position,
                replacement,
                dominated_by,
            });
        }
        None
    }

    /// Move the window for the next round.
    ///
    /// After an elimination the window restarts at the front of the set; otherwise every
    /// offset advances by one.
    pub fn rotate(&mut self, eliminated: bool) {
        let len = self.set.len().max(1);
        if eliminated {
            for (i, o) in self.offsets.iter_mut().enumerate() {
                *o = i % len;
            }
        } else {
            for o in &mut self.offsets {
                *o = (*o + 1) % len;
            }
        }
    }

    /// First candidate after the window's last slot (wrapping) that is not already shown.
    fn next_in_rotation(&self, shown: &[usize]) -> Option<usize> {
        let len = self.set.len();
        let start = self.offsets.last().copied().unwrap_or(0);
        (1..=len)
            .filter_map(|step| self.set.get((start + step) % len))
            .find(|arm| !shown.contains(arm))
    }
}
