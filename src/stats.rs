//! Per-arm running statistics.

use crate::click::ClickOutcome;

/// Observation count and empirical mean for one arm.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStats {
    pub count: u64,
    pub mean: f64,
}

impl ArmStats {
    /// Fold one binary reward into the running mean.
    pub fn update(&mut self, reward: bool) {
        let n = self.count as f64;
        let r = if reward { 1.0 } else { 0.0 };
        self.mean = (self.mean * n + r) / (n + 1.0);
        self.count = self.count.saturating_add(1);
    }
}

/// Statistics for every arm of a run, indexed by arm.
///
/// Counts never decrease. Eliminated arms keep their entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStatistics {
    arms: Vec<ArmStats>,
}

impl ArmStatistics {
    pub fn new(num_arms: usize) -> Self {
        Self {
            arms: vec![ArmStats::default(); num_arms],
        }
    }

    pub fn num_arms(&self) -> usize {
        self.arms.len()
    }

    pub fn get(&self, arm: usize) -> Option<&ArmStats> {
        self.arms.get(arm)
    }

    pub fn as_slice(&self) -> &[ArmStats] {
        &self.arms
    }

    /// Empirical means, indexed by arm.
    pub fn means(&self) -> Vec<f64> {
        self.arms.iter().map(|s| s.mean).collect()
    }

    pub fn total_observations(&self) -> u64 {
        self.arms.iter().map(|s| s.count).sum()
    }

    /// Record one binary reward for `arm`. Unknown arms are ignored.
    pub fn update(&mut self, arm: usize, reward: bool) {
        if let Some(s) = self.arms.get_mut(arm) {
            s.update(reward);
        }
    }

    /// Apply the cascading feedback of one presented list.
    ///
    /// Positions up to and including the stop get an update (reward 1 only at the stop).
    /// Positions after the stop were never examined and are left untouched.
    pub fn observe_cascade(&mut self, list: &[usize], outcome: ClickOutcome) {
        let examined = outcome.examined(list.len());
        let stop = outcome.position();
        for (pos, &arm) in list.iter().take(examined).enumerate() {
            self.update(arm, stop == Some(pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn incremental_mean_matches_arithmetic_mean() {
        let mut s = ArmStats::default();
        for r in [true, false, false, true, true] {
            s.update(r);
        }
        assert_eq!(s.count, 5);
        assert!((s.mean - 0.6).abs() < 1e-12);
    }

    #[test]
    fn cascade_updates_only_examined_prefix() {
        let mut st = ArmStatistics::new(5);
        st.observe_cascade(&[3, 1, 4], ClickOutcome::Click(1));
        assert_eq!(st.get(3).unwrap().count, 1);
        assert_eq!(st.get(3).unwrap().mean, 0.0);
        assert_eq!(st.get(1).unwrap().count, 1);
        assert_eq!(st.get(1).unwrap().mean, 1.0);
        // Position 2 was never reached.
        assert_eq!(st.get(4).unwrap().count, 0);
        assert_eq!(st.total_observations(), 2);
    }

    #[test]
    fn no_click_updates_every_position_with_zero() {
        let mut st = ArmStatistics::new(3);
        st.observe_cascade(&[0, 1, 2], ClickOutcome::NoClick);
        for arm in 0..3 {
            assert_eq!(st.get(arm).unwrap().count, 1);
            assert_eq!(st.get(arm).unwrap().mean, 0.0);
        }
    }

    #[test]
    fn unknown_arm_is_ignored() {
        let mut st = ArmStatistics::new(2);
        st.update(9, true);
        assert_eq!(st.total_observations(), 0);
    }

    proptest! {
        #[test]
        fn mean_is_arithmetic_mean_and_counts_never_drop(
            rewards in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut st = ArmStatistics::new(1);
            let mut prev = 0u64;
            for &r in &rewards {
                st.update(0, r);
                let s = *st.get(0).unwrap();
                prop_assert!(s.count > prev);
                prev = s.count;
                prop_assert!((0.0..=1.0).contains(&s.mean));
            }
            if !rewards.is_empty() {
                let ones = rewards.iter().filter(|&&r| r).count() as f64;
                let expected = ones / rewards.len() as f64;
                prop_assert!((st.get(0).unwrap().mean - expected).abs() < 1e-9);
            }
        }
    }
}
