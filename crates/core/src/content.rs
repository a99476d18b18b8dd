use serde::{Deserialize, Serialize};

pub const HEALING_POTION_AMOUNT: i32 = 10;
pub const PLAYER_BASE_DAMAGE: i32 = 5;
pub const ENEMY_ATTACK_DAMAGE: i32 = 3;
pub const EXP_PER_KILL: i32 = 10;
pub const LEVEL_UP_MAX_HP_GAIN: i32 = 5;
pub const ENEMY_HP_PER_FLOOR: i32 = 2;

/// Lines an enemy shouts when it lands a hit.
pub const ENEMY_TAUNTS: [&str; 5] = [
    "Your luck has run out!",
    "This is the end!",
    "Die!",
    "Don't underestimate me!",
    "I'll crush you!",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Goblin,
    Orc,
    Troll,
}

impl EnemyArchetype {
    /// Spawn table; a uniform draw indexes into it.
    pub const ALL: [EnemyArchetype; 3] =
        [EnemyArchetype::Goblin, EnemyArchetype::Orc, EnemyArchetype::Troll];

    pub fn stats(self) -> ArchetypeStats {
        match self {
            EnemyArchetype::Goblin => ArchetypeStats {
                name: "Goblin",
                symbol: 'g',
                color: "green",
                base_hp: 8,
                sense_radius: 6.0,
                drop: Some(WeaponTemplate {
                    name: "Rusty Dagger",
                    damage_bonus: 1,
                    symbol: 'd',
                    color: "white",
                }),
            },
            EnemyArchetype::Orc => ArchetypeStats {
                name: "Orc",
                symbol: 'o',
                color: "orange",
                base_hp: 12,
                sense_radius: 8.0,
                drop: Some(WeaponTemplate {
                    name: "Orcish Axe",
                    damage_bonus: 2,
                    symbol: 'A',
                    color: "brown",
                }),
            },
            EnemyArchetype::Troll => ArchetypeStats {
                name: "Troll",
                symbol: 'T',
                color: "darkgreen",
                base_hp: 20,
                sense_radius: 10.0,
                drop: Some(WeaponTemplate {
                    name: "Heavy Club",
                    damage_bonus: 3,
                    symbol: 'C',
                    color: "gray",
                }),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeStats {
    pub name: &'static str,
    pub symbol: char,
    pub color: &'static str,
    pub base_hp: i32,
    pub sense_radius: f64,
    pub drop: Option<WeaponTemplate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponTemplate {
    pub name: &'static str,
    pub damage_bonus: i32,
    pub symbol: char,
    pub color: &'static str,
}
