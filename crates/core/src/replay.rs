use thiserror::Error;
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::config::{ConfigError, EngineConfig};
use crate::game::Game;
use crate::journal::{CommandJournal, JOURNAL_FORMAT_VERSION};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("journal format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_floor: u32,
    pub game_over: bool,
    pub applied: usize,
    /// Commands the engine refused, such as using a potion with none in hand.
    pub rejected: usize,
    pub final_snapshot_hash: u64,
}

/// Replays a journal from a fresh seeded game.
pub fn replay(config: &EngineConfig, journal: &CommandJournal) -> Result<ReplayResult, ReplayError> {
    let caps = Capabilities::seeded(journal.seed);
    replay_with(Game::with_capabilities(journal.seed, config.clone(), caps)?, journal)
}

/// Replays a journal on top of an already-built game.
pub fn replay_with(mut game: Game, journal: &CommandJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: journal.format_version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }
    let mut applied = 0;
    let mut rejected = 0;
    for command in &journal.commands {
        match game.apply(command) {
            Ok(_) => applied += 1,
            Err(err) => {
                debug!(?command, %err, "command rejected during replay");
                rejected += 1;
            }
        }
    }
    Ok(ReplayResult {
        final_floor: game.current_floor_index(),
        game_over: game.is_game_over(),
        applied,
        rejected,
        final_snapshot_hash: game.snapshot_hash(),
    })
}
