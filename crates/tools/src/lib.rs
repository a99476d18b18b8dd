use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use delve_core::{CommandJournal, EngineConfig, ReplayResult};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

pub fn load_journal(path: &Path) -> Result<CommandJournal> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| "Failed to deserialize journal JSON")
}

pub fn save_journal(path: &Path, journal: &CommandJournal) -> Result<()> {
    let json = serde_json::to_string_pretty(journal).context("Failed to serialize journal")?;
    fs::write(path, json).with_context(|| format!("Failed to write journal file: {}", path.display()))
}

/// Reads a TOML config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub seed: u64,
    pub commands: usize,
    pub applied: usize,
    pub rejected: usize,
    pub final_floor: u32,
    pub game_over: bool,
    pub snapshot_hash: String,
}

impl ReplaySummary {
    pub fn new(journal: &CommandJournal, result: &ReplayResult) -> Self {
        Self {
            seed: journal.seed,
            commands: journal.commands.len(),
            applied: result.applied,
            rejected: result.rejected,
            final_floor: result.final_floor,
            game_over: result.game_over,
            snapshot_hash: format!("{:016x}", result.final_snapshot_hash),
        }
    }
}
