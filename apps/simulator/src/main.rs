//! Belot simulator CLI - plays complete random matches in memory.
//!
//! Every seat picks uniformly among its legal bids and cards, announces all
//! declarations it holds, and the engine scores each round until a team wins.

mod metrics;
mod output;
mod simulator;
mod types;

use belot_engine::domain::Team;
use belot_engine::RulesConfig;
use clap::Parser;
use metrics::build_game_metrics;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "belot-simulator")]
#[command(about = "In-memory Belot match simulator")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// JSON rules file (defaults to BELOT_RULES, then the standard rules)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the JSONL output
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,
}

fn load_rules(path: Option<&PathBuf>) -> Result<RulesConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(RulesConfig::from_env()?);
    };
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(RulesConfig::from_json(Some(&value))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only show warnings/errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = load_rules(args.rules.as_ref())?;
    if args.show_output {
        info!(games = args.games, points_to_win = rules.points_to_win, "starting simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        match Simulator::new(game_seed, rules.clone()).simulate_game() {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    &rules,
                    &result,
                    args.metrics_level,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game_num, winner = %result.winner, totals = ?result.totals, "game completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game_num, game_seed, "Game failed: {}", e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    if errors > 0 {
        return Err(format!("{errors} of {} games failed", args.games).into());
    }
    Ok(())
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let rounds: usize = results.iter().map(GameResult::rounds_played).sum();
    let belot_runs = results.iter().filter(|r| r.ended_by_belot_run()).count();
    println!(
        "Average rounds per game: {:.1}",
        rounds as f64 / results.len() as f64
    );
    println!("Ended by belot run: {}", belot_runs);

    println!("\n=== Results by Team ===");
    for team in Team::ALL {
        let wins = results.iter().filter(|r| r.winner == team).count();
        let avg_total = results
            .iter()
            .map(|r| f64::from(r.totals[team.index()]))
            .sum::<f64>()
            / results.len() as f64;
        println!(
            "Team {}: wins={} ({:.1}%), avg total={:.1}",
            team,
            wins,
            wins as f64 / results.len() as f64 * 100.0,
            avg_total
        );
    }
}
