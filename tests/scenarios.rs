use cascade::{
    decode_joint, encode_joint, run_elimination, run_explore_commit, run_independent_agents,
    run_policy, run_repeated, average_regret, ArmStatistics, ClickOutcome, ClickSimulator,
    ConfidenceBoundEngine, ConfigError, Error, FixedPolicy, JointArmCodec, JointScenario,
    RegretTracker, RoundNote, Scenario, ScenarioGenerator, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cfg(num_positions: usize, horizon: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_positions,
        horizon,
        seed,
        ..SimulationConfig::default()
    }
}

#[test]
fn fixed_worst_arm_accrues_the_oracle_gap_each_round() {
    let scenario = Scenario::new(vec![0.1, 0.5, 0.9]).unwrap();
    let mut tracker = RegretTracker::for_scenario(scenario.probabilities(), 1);
    assert!((tracker.oracle() - 0.9).abs() < 1e-12);
    let r = tracker.record_recommendation(&[0], scenario.probabilities());
    assert!((r - 0.8).abs() < 1e-12);

    let report = run_policy(&mut FixedPolicy::new(vec![0]), &scenario, &cfg(1, 100, 3)).unwrap();
    assert_eq!(report.ledger.len(), 100);
    assert!((report.ledger.final_regret() - 80.0).abs() < 1e-9);
}

#[test]
fn unobserved_arms_have_infinite_upper_bounds_until_seen() {
    let engine = ConfidenceBoundEngine::new(100, 1.5);
    let mut stats = ArmStatistics::new(3);
    assert!(engine
        .bounds(&stats)
        .iter()
        .all(|b| b.ucb == f64::INFINITY && b.lcb == f64::NEG_INFINITY));

    stats.observe_cascade(&[0], ClickOutcome::NoClick);
    let b = engine.bounds(&stats);
    assert!(b[0].ucb.is_finite());
    assert!(b[0].lcb.is_finite());
    assert_eq!(b[1].ucb, f64::INFINITY);
    assert_eq!(b[2].ucb, f64::INFINITY);
}

#[test]
fn two_player_codec_is_mixed_radix() {
    let codec = JointArmCodec::new(2, 3).unwrap();
    assert_eq!(codec.encode(&[1, 2]).unwrap(), 5);
    assert_eq!(codec.decode(5).unwrap(), vec![1, 2]);
    assert_eq!(encode_joint(&[1, 2], 3).unwrap(), 5);
    assert_eq!(decode_joint(5, 2, 3).unwrap(), vec![1, 2]);
    assert!(matches!(
        decode_joint(9, 2, 3),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn cascade_stops_at_the_first_success() {
    let scenario = Scenario::new(vec![0.0, 1.0, 1.0]).unwrap();
    let mut sim = ClickSimulator::with_seed(&scenario, 3, 0).unwrap();
    assert_eq!(sim.recommend(&[0, 1, 2]).unwrap(), ClickOutcome::Click(1));
    assert_eq!(sim.recommend(&[2, 0, 1]).unwrap(), ClickOutcome::Click(0));
    assert!(sim.recommend(&[0, 1]).is_err());
    assert_eq!(sim.history().len(), 2);
}

#[test]
fn clearly_worse_arms_are_eliminated_down_to_the_list_length() {
    let scenario = Scenario::new(vec![0.0, 0.0, 0.0, 0.9, 0.95]).unwrap();
    let report = run_elimination(&scenario, &cfg(2, 5_000, 11)).unwrap();
    let mut surviving = report.surviving_arms.clone();
    surviving.sort_unstable();
    assert_eq!(surviving, vec![3, 4]);
    let mut eliminated = report.eliminated_arms.clone();
    eliminated.sort_unstable();
    assert_eq!(eliminated, vec![0, 1, 2]);
    // Once only the best arms remain, rounds stop accruing regret.
    let tail = &report.ledger.as_slice()[4_000..];
    assert!(tail.windows(2).all(|w| (w[1] - w[0]).abs() < 1e-12));
}

#[test]
fn elimination_notes_are_recorded_per_round() {
    let scenario = Scenario::new(vec![0.0, 0.0, 0.9, 0.95]).unwrap();
    let config = SimulationConfig {
        record_rounds: true,
        ..cfg(1, 3_000, 5)
    };
    let report = run_elimination(&scenario, &config).unwrap();
    let noted: Vec<usize> = report
        .rounds
        .iter()
        .flat_map(|r| r.notes.iter())
        .filter_map(|n| match n {
            RoundNote::Eliminated(e) => Some(e.arm),
            _ => None,
        })
        .collect();
    assert_eq!(noted, report.eliminated_arms);
    assert!(!noted.is_empty());
}

#[test]
fn same_seed_reproduces_the_run() {
    let scenario = Scenario::new(vec![0.2, 0.25, 0.3, 0.5, 0.55, 0.6]).unwrap();
    let config = SimulationConfig {
        record_history: true,
        ..cfg(2, 800, 42)
    };
    let a = run_elimination(&scenario, &config).unwrap();
    let b = run_elimination(&scenario, &config).unwrap();
    assert_eq!(a, b);

    let other = run_elimination(&scenario, &SimulationConfig { seed: 43, ..config }).unwrap();
    assert_ne!(a.history, other.history);
}

#[test]
fn explore_commit_covers_the_horizon_deterministically() {
    let mut rng = StdRng::seed_from_u64(9);
    let joint = JointScenario::generate(2, 3, ScenarioGenerator::Uniform, &mut rng).unwrap();
    let config = cfg(2, 300, 1);
    let a = run_explore_commit(&joint, &config).unwrap();
    let b = run_explore_commit(&joint, &config).unwrap();
    assert_eq!(a.ledger.len(), 300);
    assert_eq!(a, b);
    assert!(a
        .ledger
        .as_slice()
        .windows(2)
        .all(|w| w[1] >= w[0]));
}

#[test]
fn explore_commit_retires_joint_arms_that_never_click() {
    let mut probs = vec![0.0; 6];
    probs.extend([0.95; 3]);
    let joint = JointScenario::new(2, 3, probs).unwrap();
    let config = SimulationConfig {
        exploration_c: 0.5,
        ..cfg(2, 20_000, 3)
    };
    let report = run_explore_commit(&joint, &config).unwrap();
    let mut eliminated = report.eliminated_arms.clone();
    eliminated.sort_unstable();
    assert_eq!(eliminated, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(report.surviving_arms, vec![6, 7, 8]);
}

#[test]
fn explore_commit_rejects_more_positions_than_joint_arms() {
    let joint = JointScenario::new(1, 2, vec![0.3, 0.7]).unwrap();
    let err = run_explore_commit(&joint, &cfg(3, 10, 0)).unwrap_err();
    assert_eq!(
        err,
        Error::Config(ConfigError::PositionsExceedArms {
            num_positions: 3,
            num_arms: 2,
        })
    );
}

#[test]
fn independent_agents_share_one_reward() {
    let scenario = Scenario::new(vec![0.1, 0.4, 0.8]).unwrap();
    let a = run_independent_agents(&scenario, 2, &cfg(1, 500, 4)).unwrap();
    let b = run_independent_agents(&scenario, 2, &cfg(1, 500, 4)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.scores[0], a.scores[1]);
    assert!(a.statistics.iter().all(|s| s.total_observations() == 500));
}

#[test]
fn repeated_runs_average_pointwise() {
    let scenario = Scenario::new(vec![0.1, 0.2, 0.6, 0.7]).unwrap();
    let reports = run_repeated(&scenario, &cfg(1, 200, 8), 4).unwrap();
    let ledgers: Vec<_> = reports.iter().map(|r| r.ledger.clone()).collect();
    let mean = average_regret(&ledgers);
    assert_eq!(mean.len(), 200);
    let last = ledgers.iter().map(|l| l.final_regret()).sum::<f64>() / 4.0;
    assert!((mean[199] - last).abs() < 1e-9);
}

#[test]
fn invalid_scenarios_fail_at_setup() {
    assert_eq!(Scenario::new(vec![]), Err(ConfigError::EmptyScenario));
    assert!(matches!(
        Scenario::new(vec![0.5, 1.5]),
        Err(ConfigError::ProbabilityOutOfRange { arm: 1, .. })
    ));
    assert!(matches!(
        JointScenario::new(2, 2, vec![0.5; 3]),
        Err(ConfigError::ProbabilityCountMismatch {
            expected: 4,
            actual: 3
        })
    ));
    let scenario = Scenario::new(vec![0.5, 0.6]).unwrap();
    assert!(run_elimination(&scenario, &cfg(1, 0, 0)).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn config_and_report_serialize() {
    let config = SimulationConfig {
        record_rounds: true,
        ..cfg(1, 20, 2)
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    let partial: SimulationConfig = serde_json::from_str(r#"{"horizon": 50}"#).unwrap();
    assert_eq!(partial.horizon, 50);
    assert_eq!(partial.num_positions, 1);

    let bad: Result<Scenario, _> = serde_json::from_str("[0.5, 2.0]");
    assert!(bad.is_err());

    let scenario = Scenario::new(vec![0.2, 0.8]).unwrap();
    let report = run_elimination(&scenario, &config).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["rounds"].as_array().unwrap().len(), 20);
}
