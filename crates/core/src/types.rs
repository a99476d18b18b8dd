use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

use crate::content::EnemyArchetype;

new_key_type! {
    pub struct EnemyId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// King-move distance; 1 means the two cells touch, diagonals included.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean(self, other: Pos) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn neighbors4(self) -> [Pos; 4] {
        [self.offset(0, -1), self.offset(1, 0), self.offset(0, 1), self.offset(-1, 0)]
    }

    pub fn neighbors8(self) -> [Pos; 8] {
        [
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(1, 0),
            self.offset(1, 1),
            self.offset(0, 1),
            self.offset(-1, 1),
            self.offset(-1, 0),
            self.offset(-1, -1),
        ]
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Four,
    Eight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no healing potions")]
    NoItem,
    #[error("no weapons in inventory")]
    NoWeapons,
    #[error("weapon index {index} is out of range for {len} weapons")]
    InvalidIndex { index: usize, len: usize },
    #[error("({dx}, {dy}) is not a single cardinal step")]
    InvalidDirection { dx: i32, dy: i32 },
    #[error("no such enemy on the current floor")]
    UnknownEnemy,
    #[error("the game is over")]
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { to: Pos },
    Attacked { enemy: EnemyId, defeated: bool },
    ChangedFloor { from: u32, to: u32 },
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickedItem {
    HealingPotion { heal_amount: i32 },
    Weapon { name: String, damage_bonus: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    EnemyAlerted { enemy: EnemyId, archetype: EnemyArchetype },
    EnemyDamaged { enemy: EnemyId, damage: i32, remaining_hp: i32 },
    EnemyDefeated { enemy: EnemyId, archetype: EnemyArchetype, pos: Pos },
    WeaponDropped { name: String, pos: Pos },
    ItemPickedUp { item: PickedItem },
    PotionUsed { hp_before: i32, hp_after: i32 },
    WeaponEquipped { index: usize, name: String },
    PlayerDamaged { enemy: EnemyId, amount: i32, hp: i32, taunt: &'static str },
    ExperienceGained { amount: i32 },
    LevelUp { level: u32, max_hp: i32 },
    GameOver,
    FloorChanged { from: u32, to: u32, direction: StairDirection },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::EnemyAlerted { archetype, .. } => {
                write!(f, "The {} notices you!", archetype.stats().name)
            }
            GameEvent::EnemyDamaged { damage, remaining_hp, .. } => {
                write!(f, "You hit for {damage} ({remaining_hp} HP left)")
            }
            GameEvent::EnemyDefeated { archetype, .. } => {
                write!(f, "The {} is defeated!", archetype.stats().name)
            }
            GameEvent::WeaponDropped { name, .. } => write!(f, "Enemy dropped a {name}!"),
            GameEvent::ItemPickedUp { item: PickedItem::HealingPotion { .. } } => {
                write!(f, "Healing potion picked up!")
            }
            GameEvent::ItemPickedUp { item: PickedItem::Weapon { name, .. } } => {
                write!(f, "Picked up a {name}!")
            }
            GameEvent::PotionUsed { hp_before, hp_after } => {
                write!(f, "Used healing potion: HP {hp_before} -> {hp_after}")
            }
            GameEvent::WeaponEquipped { name, .. } => write!(f, "Equipped {name}!"),
            GameEvent::PlayerDamaged { amount, hp, taunt, .. } => {
                write!(f, "\"{taunt}\" You take {amount} damage ({hp} HP left)")
            }
            GameEvent::ExperienceGained { amount } => write!(f, "Gained {amount} experience"),
            GameEvent::LevelUp { level, .. } => write!(f, "Welcome to level {level}!"),
            GameEvent::GameOver => write!(f, "Game over"),
            GameEvent::FloorChanged { to, .. } => write!(f, "Entered floor {to}"),
        }
    }
}

/// Read-only view of the player for a status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatus {
    pub hp: i32,
    pub max_hp: i32,
    pub floor: u32,
    pub level: u32,
    pub exp: i32,
    pub next_exp: i32,
    pub potions: usize,
    pub weapon: Option<String>,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP: {}/{}  Floor: {}  Level: {}  EXP: {}/{}  Potions: {}  Weapon: {}",
            self.hp,
            self.max_hp,
            self.floor,
            self.level,
            self.exp,
            self.next_exp,
            self.potions,
            self.weapon.as_deref().unwrap_or("None")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyStatus {
    pub id: EnemyId,
    pub name: &'static str,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
}

impl fmt::Display for EnemyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Lv {}) HP: {}/{}", self.name, self.level, self.hp, self.max_hp)
    }
}
