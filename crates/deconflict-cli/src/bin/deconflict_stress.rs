//! Throughput check: one primary against growing amounts of random traffic.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use deconflict_cli::sim::{random_mission, random_traffic, TrafficConfig};
use deconflict_cli::{init_tracing, Config};
use deconflict_core::{Deconflictor, EngineRules};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deconfliction throughput against random traffic")]
struct Args {
    /// Traffic sizes to evaluate
    #[arg(long, value_delimiter = ',', default_value = "10,100,1000,5000")]
    sizes: Vec<usize>,

    /// Seed for reproducible traffic; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Half-width of the airspace square in meters
    #[arg(long, default_value_t = 2_000.0)]
    extent: f64,

    /// Force sequential evaluation
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    init_tracing(config.log_json)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let traffic = TrafficConfig {
        extent_m: args.extent,
        ..TrafficConfig::default()
    };

    let mut rules: EngineRules = config.engine_rules(None)?;
    rules.parallel = rules.parallel && !args.sequential;
    let engine = Deconflictor::new(rules);

    let primary = random_mission(&mut rng, "PRIMARY-STRESS", &traffic);
    println!(
        "Primary: {} waypoints over {:.0}s, buffer {:.1}m, parallel={}",
        primary.waypoints.len(),
        primary.duration(),
        engine.rules().safety_buffer.distance(),
        engine.rules().parallel
    );

    for size in args.sizes {
        let others = random_traffic(&mut rng, size, &traffic);
        let started = Instant::now();
        let report = engine.evaluate(&primary, &others)?;
        let elapsed = started.elapsed();

        println!(
            "\n=== {} missions ===\nverdict={:?} episodes={} conflicting_owners={} elapsed={:.2}ms ({:.1} missions/ms)",
            size,
            report.verdict,
            report.episodes.len(),
            report.conflicting_owners().len(),
            elapsed.as_secs_f64() * 1000.0,
            size as f64 / (elapsed.as_secs_f64() * 1000.0).max(1e-6)
        );
    }

    Ok(())
}
