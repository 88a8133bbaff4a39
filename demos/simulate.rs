//! Run a batch of secretary-problem trials and print the report.
//!
//! Run with:
//!   RUST_LOG=secretary=debug cargo run --example simulate -- [pool_size] [trials] [fraction] [seed]

use secretary::theory::{optimal_cutoff, sweep_fractions, theoretical_success_rate};
use secretary::{Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let pool_size: usize = args.first().map(|s| s.parse()).transpose()?.unwrap_or(10);
    let trials: usize = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(1000);
    let fraction: f64 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(0.37);
    let seed: u64 = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(0);

    let cfg = SimulatorConfig::default()
        .with_pool_size(pool_size)
        .with_exploration_fraction(fraction)
        .with_seed(seed);
    let mut sim = Simulator::new(cfg)?;

    // -----------------------------------------------------------------
    // 1. One trial in detail.
    // -----------------------------------------------------------------
    let t = sim.run_one()?.clone();
    println!("=== Single trial (n={pool_size}, cutoff={}) ===", t.exploration_cutoff);
    for (c, tag) in t.pool.candidates().iter().zip(t.phase_tags()) {
        println!("  #{:<3} {:.3}  {:?}", c.index, c.score, tag);
    }
    println!(
        "  threshold={:.3} selected=#{} rank={} fallback={}",
        t.threshold, t.selected_index, t.rank, t.fallback_used
    );

    // -----------------------------------------------------------------
    // 2. Batch statistics.
    // -----------------------------------------------------------------
    sim.reset_history();
    sim.run_many(trials)?;
    let stats = sim.statistics();
    let (lo, hi) = stats.success_interval(1.96);
    println!("\n=== {trials} trials ===");
    print!("{stats}");
    println!("95% interval:  [{:.3}, {:.3}]", lo, hi);
    print!("{}", stats.render_histogram(50));

    // -----------------------------------------------------------------
    // 3. Theory vs simulation across fractions.
    // -----------------------------------------------------------------
    let k = optimal_cutoff(pool_size)?;
    println!(
        "\nOptimal cutoff for n={pool_size}: {k} (P = {:.3})",
        theoretical_success_rate(pool_size, k)?
    );
    let grid = [0.1, 0.2, 0.3, 0.37, 0.5, 0.7, 0.9];
    for p in sweep_fractions(pool_size, &grid, trials, seed)? {
        println!(
            "  r={:.2} cutoff={:<4} empirical={:.3} theory={:.3}",
            p.exploration_fraction, p.cutoff, p.empirical.success_rate, p.theoretical
        );
    }
    Ok(())
}
