use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use delve_core::replay;
use delve_tools::{ReplaySummary, init_tracing, load_config, load_journal};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Engine config TOML; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Replay under a different seed than the one recorded
    #[arg(short, long)]
    seed: Option<u64>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("info");

    let mut journal = load_journal(&args.journal)?;
    if let Some(seed) = args.seed {
        info!(recorded = journal.seed, seed, "overriding journal seed");
        journal.seed = seed;
    }
    let config = load_config(args.config.as_deref())?;

    let result = replay(&config, &journal).context("Replay failed")?;
    let summary = ReplaySummary::new(&journal, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("Replay complete.");
    println!("Commands: {} applied, {} rejected", summary.applied, summary.rejected);
    println!("Final Floor: {}", summary.final_floor);
    println!("Game Over: {}", summary.game_over);
    println!("Snapshot Hash: {}", summary.snapshot_hash);

    Ok(())
}
