//! Regret curves for the single-player elimination learner and the multi-player
//! explore/commit scheduler.
//!
//! Run with:
//!   cargo run --example regret_curve
//!
//! Set `RUST_LOG=cascade=debug` to watch eliminations and phase changes.

use cascade::{
    average_regret, run_explore_commit, run_policy, run_repeated, FixedPolicy, JointScenario,
    Scenario, ScenarioGenerator, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn print_curve(label: &str, curve: &[f64], points: usize) {
    println!("{label}");
    let step = (curve.len() / points).max(1);
    for (t, r) in curve.iter().enumerate().skip(step - 1).step_by(step) {
        println!("  t={:>6}  regret={:>9.2}", t + 1, r);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let scenario = Scenario::generate(
        12,
        ScenarioGenerator::Beta {
            alpha: 1.0,
            beta: 4.0,
        },
        &mut rng,
    )?;
    println!("hidden probabilities: {:.3?}", scenario.probabilities());

    let cfg = SimulationConfig {
        num_positions: 3,
        horizon: 20_000,
        seed: 7,
        ..SimulationConfig::default()
    };

    // Elimination, averaged over repetitions.
    let reports = run_repeated(&scenario, &cfg, 8)?;
    let ledgers: Vec<_> = reports.iter().map(|r| r.ledger.clone()).collect();
    print_curve("elimination (mean of 8 runs):", &average_regret(&ledgers), 10);
    println!("  surviving arms (run 0): {:?}", reports[0].surviving_arms);

    // Non-adaptive baseline: always the first three arms.
    let baseline = run_policy(&mut FixedPolicy::new(vec![0, 1, 2]), &scenario, &cfg)?;
    print_curve("fixed [0, 1, 2]:", baseline.ledger.as_slice(), 10);

    // Two players with four choices each: 16 joint arms.
    let joint = JointScenario::generate(2, 4, ScenarioGenerator::Uniform, &mut rng)?;
    let joint_cfg = SimulationConfig {
        num_positions: 2,
        ..cfg
    };
    let report = run_explore_commit(&joint, &joint_cfg)?;
    print_curve("explore/commit (2 players, radix 4):", report.ledger.as_slice(), 10);
    println!(
        "  oracle score per round: {:.3}, user successes: {}",
        report.oracle_score, report.successes
    );
    Ok(())
}
