use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// One decoded player command, as an input layer would hand it to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Move { dx: i32, dy: i32 },
    UseHealingItem,
    EquipWeapon { index: usize },
    AutoRun { direction: Direction },
    ToggleOverview,
    SelectEnemy { x: i32, y: i32 },
}

impl Command {
    pub fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Command::Move { dx, dy }
    }

    pub fn select(pos: Pos) -> Self {
        Command::SelectEnemy { x: pos.x, y: pos.y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub seed: u64,
    pub commands: Vec<Command>,
}

impl CommandJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, commands: Vec::new() }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
