//! `cascade`: deterministic, seedable learning for cascading bandits.
//!
//! Each round a learner shows an ordered list of `num_positions` arms. The user scans it
//! top to bottom and stops at the first arm whose hidden Bernoulli trial succeeds, or
//! reaches the end with no success. The learner sees only the stop position. Arms below
//! the stop are never examined, so they yield no information that round.
//!
//! The crate implements the **elimination-based confidence-bound engine** for this model
//! and the regret accounting that measures it against an oracle:
//!
//! - [`ClickSimulator`]: the cascading user, driven by an injected, seedable RNG.
//! - [`ArmStatistics`]: per-arm count and running mean, updated from the examined prefix.
//! - [`ConfidenceBoundEngine`]: `μ ± sqrt(c · ln T / n)`, infinite for unobserved arms.
//! - [`CandidateSetManager`]: rotating window over a shrinking candidate set, retiring an
//!   arm once `num_positions` candidates confidently beat it.
//! - [`JointArmCodec`]: mixed-radix mapping between per-player choices and joint arms.
//! - [`PhaseScheduler`]: explore/commit state machine for cooperating players, with a
//!   doubling commit schedule.
//! - [`RegretTracker`]: cumulative regret against `1 - Π(1 - p)` over the true top arms.
//!
//! **Goals:**
//! - **Deterministic by default**: same scenario + config + seed → same run.
//! - **Explicit state**: every run owns its statistics, candidate set and RNG; nothing
//!   is global, so independent runs can be repeated and averaged ([`run_repeated`]).
//! - **Fail before the first round**: scenarios and configs validate up front
//!   ([`ConfigError`]); a malformed list at call time is an [`InvalidInputError`].
//!
//! **Entry points:**
//! - [`run_elimination`]: single-player elimination learner.
//! - [`run_explore_commit`]: multi-player explore/commit over a [`JointScenario`].
//! - [`run_independent_agents`]: independent UCB players sharing one user.
//! - [`run_policy`]: any [`CascadePolicy`] (e.g. [`FixedPolicy`] as a baseline).
//!
//! **Non-goals:**
//! - No persistence of learned state across runs.
//! - No distributed or multi-process execution; a run is one sequential loop.
//!
//! ```rust
//! use cascade::{run_elimination, Scenario, SimulationConfig};
//!
//! let scenario = Scenario::new(vec![0.05, 0.1, 0.3, 0.6, 0.7]).unwrap();
//! let cfg = SimulationConfig {
//!     num_positions: 2,
//!     horizon: 500,
//!     seed: 7,
//!     ..SimulationConfig::default()
//! };
//! let report = run_elimination(&scenario, &cfg).unwrap();
//! assert_eq!(report.ledger.len(), 500);
//! assert!(report.surviving_arms.len() >= 2);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for eliminations and phase changes, `trace`
//! per round, `info` at the end of a run). It never installs a subscriber.

#![forbid(unsafe_code)]

/// Default exploration constant `c` in the confidence radius.
pub const DEFAULT_EXPLORATION_C: f64 = 1.5;

/// Tolerance for floating-point comparisons between scores.
const TIEBREAK_EPS: f64 = 1e-12;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod seed;
pub use seed::*;

mod alloc;
pub use alloc::*;

mod click;
pub use click::*;

mod stats;
pub use stats::*;

mod bounds;
pub use bounds::*;

mod candidate;
pub use candidate::*;

mod codec;
pub use codec::*;

mod regret;
pub use regret::*;

mod round;
pub use round::*;

mod learner;
pub use learner::*;

mod policy;
pub use policy::*;

mod scheduler;
pub use scheduler::*;

mod multi_agent;
pub use multi_agent::*;

mod simulation;
pub use simulation::*;
