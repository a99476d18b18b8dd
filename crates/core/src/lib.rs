pub mod capabilities;
pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod replay;
pub mod state;
pub mod types;

mod floor;
mod mapgen;

pub use capabilities::{
    AStar, Capabilities, MapGenerator, Pathfinder, RandomSource, RoomsAndCorridors, SeededRandom,
    Shadowcasting, VisibilityProvider,
};
pub use config::{ConfigError, EngineConfig, EnemyHpScaling};
pub use content::EnemyArchetype;
pub use game::{
    AutoRun, AutoRunStep, AutoRunStop, AutoRunSummary, CancelHandle, CommandOutcome,
    FloorOverview, Game, Glyph,
};
pub use journal::{Command, CommandJournal};
pub use replay::{ReplayError, ReplayResult, replay, replay_with};
pub use state::{Enemy, Floor, HealingItem, Map, Player, WeaponItem};
pub use types::*;
