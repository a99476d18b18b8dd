//! Shared test fixtures for the engine's unit suites.
//! This module exists to avoid repeating map, capability, and entity setup across tests.
//! It does not own production gameplay logic.

use super::*;
use crate::capabilities::{MapGenerator, RandomSource};
use crate::content::{EnemyArchetype, HEALING_POTION_AMOUNT};
use crate::state::{Enemy, HealingItem, Map, WeaponItem};

/// Hands back the same tile grid for every floor.
pub(crate) struct FixedLayout(pub(crate) Map);

impl MapGenerator for FixedLayout {
    fn generate(&self, _width: usize, _height: usize, _rng: &mut dyn RandomSource) -> Map {
        self.0.clone()
    }
}

/// Replays a fixed list of uniform draws, cycling when exhausted.
pub(crate) struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

pub(crate) fn fixed_caps(map: Map, seed: u64) -> Capabilities {
    Capabilities::seeded(seed).with_map_generator(FixedLayout(map))
}

pub(crate) fn quiet_config(map: &Map) -> EngineConfig {
    EngineConfig {
        floor_width: map.width,
        floor_height: map.height,
        enemies_per_floor: 0,
        potions_per_floor: 0,
        ..EngineConfig::default()
    }
}

/// Empty floor 1 built from `map`, with the down stairs and player pinned.
pub(crate) fn game_with_map(map: Map, down_stairs: Pos, player: Pos) -> Game {
    let config = quiet_config(&map);
    let mut game =
        Game::with_capabilities(7, config, fixed_caps(map, 7)).expect("fixture config is valid");
    game.floor_mut().down_stairs = down_stairs;
    place_player(&mut game, player);
    game.drain_events();
    game
}

/// Straight east-west corridor on row 2 from x = 1 to x = `length`.
pub(crate) fn corridor_map(length: i32) -> Map {
    let mut map = Map::filled(length as usize + 2, 5, TileKind::Wall);
    for x in 1..=length {
        map.set_tile(Pos::new(x, 2), TileKind::Floor);
    }
    map
}

pub(crate) fn place_player(game: &mut Game, pos: Pos) {
    game.player.pos = pos;
    game.floor_mut().player_pos = Some(pos);
}

pub(crate) fn add_enemy(game: &mut Game, archetype: EnemyArchetype, pos: Pos) -> EnemyId {
    let stats = archetype.stats();
    let level = game.current_floor;
    let enemies = &mut game.floor_mut().enemies;
    let id = enemies.insert(Enemy {
        id: EnemyId::default(),
        archetype,
        pos,
        hp: stats.base_hp,
        max_hp: stats.base_hp,
        level,
        sense_radius: stats.sense_radius,
        alerted: false,
        selected: false,
    });
    enemies[id].id = id;
    id
}

pub(crate) fn add_potion(game: &mut Game, pos: Pos) {
    game.floor_mut().healing_items.push(HealingItem { pos, heal_amount: HEALING_POTION_AMOUNT });
}

pub(crate) fn give_weapon(game: &mut Game, archetype: EnemyArchetype) {
    let template = archetype.stats().drop.expect("every archetype has a drop");
    let pos = game.player.pos;
    game.player.weapons.push(WeaponItem::from_template(&template, pos));
}

pub(crate) fn set_enemy_hp(game: &mut Game, enemy: EnemyId, hp: i32) {
    game.floor_mut().enemies[enemy].hp = hp;
}

pub(crate) fn set_player_hp(game: &mut Game, hp: i32) {
    game.player.hp = hp;
}
