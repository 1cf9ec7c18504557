//! Check a primary mission against planned traffic.
//!
//! Usage:
//!   deconflict check --input airspace.json [--buffer 50] [--format json]
//!   deconflict demo [--scenario 2]
//!   deconflict scenarios
//!
//! Exit code is 0 when the mission is clear, 2 when it conflicts, 1 on error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deconflict_cli::input::load_airspace;
use deconflict_cli::report::{render_summary, render_table, SummaryRow};
use deconflict_cli::sim::{catalogue, find_scenario, Scenario};
use deconflict_cli::{init_tracing, Config};
use deconflict_core::{DeconflictionReport, Deconflictor, EngineRules};

#[derive(Parser, Debug)]
#[command(author, version, about = "Strategic deconfliction for drone missions")]
struct Args {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the primary mission in an airspace file
    Check {
        /// Airspace JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Safety buffer in meters (overrides the file and DECONFLICT_BUFFER_M)
        #[arg(long)]
        buffer: Option<f64>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run the built-in scenario catalogue
    Demo {
        /// Run only this scenario
        #[arg(long)]
        scenario: Option<u32>,
    },
    /// List the built-in scenarios
    Scenarios,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env();
    init_tracing(args.log_json || config.log_json)?;

    match args.command {
        Command::Check {
            input,
            buffer,
            format,
        } => {
            let airspace = load_airspace(&input)?;
            let rules = config.engine_rules(buffer.or(airspace.buffer_m))?;
            tracing::info!(
                "Checking {} against {} missions from {}",
                airspace.primary.owner_id,
                airspace.others.len(),
                input.display()
            );

            let report = Deconflictor::new(rules.clone()).evaluate(&airspace.primary, &airspace.others)?;
            match format {
                OutputFormat::Text => print!("{}", render_summary(&report, rules.safety_buffer)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            Ok(exit_code(&report))
        }
        Command::Demo { scenario } => {
            let scenarios = match scenario {
                Some(id) => vec![find_scenario(id).ok_or_else(|| anyhow!("Unknown scenario {id}"))?],
                None => catalogue(),
            };

            let mut rows = Vec::with_capacity(scenarios.len());
            let mut any_conflict = false;
            for scenario in &scenarios {
                let report = run_scenario(scenario, &config)?;
                any_conflict |= !report.is_clear();
                rows.push(SummaryRow {
                    scenario: scenario.name.clone(),
                    approved: report.is_clear(),
                    episodes: report.episodes.len(),
                });
            }

            println!("\n{}", "=".repeat(52));
            print!("{}", render_table(&rows));
            Ok(if any_conflict {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Scenarios => {
            for scenario in catalogue() {
                println!(
                    "{:>2}  {:<28} {} ({} other missions)",
                    scenario.id,
                    scenario.name,
                    scenario.description,
                    scenario.others.len()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_scenario(scenario: &Scenario, config: &Config) -> Result<DeconflictionReport> {
    println!("\n{}", "=".repeat(52));
    println!("SCENARIO {}: {}", scenario.id, scenario.name);
    println!("{}", "=".repeat(52));
    println!(
        "Primary {}: {} waypoints, {:.1}s, {:.1}m",
        scenario.primary.owner_id,
        scenario.primary.waypoints.len(),
        scenario.primary.duration(),
        scenario.primary.total_distance()
    );
    println!("Planned traffic: {} missions\n", scenario.others.len());

    let rules = EngineRules {
        safety_buffer: scenario.buffer,
        parallel: config.parallel,
        ..EngineRules::default()
    };
    let report = Deconflictor::new(rules).evaluate(&scenario.primary, &scenario.others)?;
    print!("{}", render_summary(&report, scenario.buffer));
    Ok(report)
}

fn exit_code(report: &DeconflictionReport) -> ExitCode {
    if report.is_clear() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
