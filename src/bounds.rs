//! Confidence bounds over [`ArmStatistics`].
//!
//! For an arm with `n > 0` observations and mean `μ`:
//!
//! ```text
//!   radius = sqrt(c * ln(T) / n)
//!   UCB    = μ + radius
//!   LCB    = μ - radius
//! ```
//!
//! `T` is the whole round budget, not the current round: the interval targets control over
//! the full horizon. Unobserved arms get `(+∞, -∞)`, so they rank first by UCB, last by
//! LCB, and can never be eliminated before they are tried.

use crate::stats::{ArmStatistics, ArmStats};
use crate::DEFAULT_EXPLORATION_C;

/// UCB/LCB pair for one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceBounds {
    pub ucb: f64,
    pub lcb: f64,
}

impl ConfidenceBounds {
    /// Bounds of an arm with no observations.
    pub const UNOBSERVED: ConfidenceBounds = ConfidenceBounds {
        ucb: f64::INFINITY,
        lcb: f64::NEG_INFINITY,
    };

    /// `true` when this arm is confidently worse than `other`.
    pub fn dominated_by(&self, other: &ConfidenceBounds) -> bool {
        self.ucb < other.lcb
    }
}

/// Half-width of the interval. Infinite for `count == 0`.
pub fn confidence_radius(count: u64, horizon: usize, exploration_c: f64) -> f64 {
    if count == 0 {
        return f64::INFINITY;
    }
    let c = sanitize_c(exploration_c);
    let ln_t = (horizon.max(1) as f64).ln();
    (c * ln_t / count as f64).sqrt()
}

/// Stateless bound calculator for a fixed horizon and exploration constant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceBoundEngine {
    pub horizon: usize,
    pub exploration_c: f64,
}

impl ConfidenceBoundEngine {
    pub fn new(horizon: usize, exploration_c: f64) -> Self {
        Self {
            horizon,
            exploration_c,
        }
    }

    pub fn arm(&self, stats: ArmStats) -> ConfidenceBounds {
        if stats.count == 0 {
            return ConfidenceBounds::UNOBSERVED;
        }
        let r = confidence_radius(stats.count, self.horizon, self.exploration_c);
        ConfidenceBounds {
            ucb: stats.mean + r,
            lcb: stats.mean - r,
        }
    }

    /// Bounds for every tracked arm, indexed by arm.
    pub fn bounds(&self, stats: &ArmStatistics) -> Vec<ConfidenceBounds> {
        stats.as_slice().iter().map(|&s| self.arm(s)).collect()
    }
}

/// Convenience form of [`ConfidenceBoundEngine::bounds`].
pub fn confidence_bounds(
    stats: &ArmStatistics,
    horizon: usize,
    exploration_c: f64,
) -> Vec<ConfidenceBounds> {
    ConfidenceBoundEngine::new(horizon, exploration_c).bounds(stats)
}

fn sanitize_c(c: f64) -> f64 {
    if c.is_finite() && c >= 0.0 {
        c
    } else {
        DEFAULT_EXPLORATION_C
    }
}
