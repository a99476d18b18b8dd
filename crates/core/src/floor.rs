//! Fresh floor construction: tiles, stair resolution, and entity seeding.
//! This module exists so generation rules stay separate from session bookkeeping.
//! It does not own the floor cache or the player's persistent state.

use std::collections::BTreeSet;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::capabilities::{Capabilities, RandomSource};
use crate::config::EngineConfig;
use crate::content::{EnemyArchetype, HEALING_POTION_AMOUNT};
use crate::state::{Enemy, Floor, HealingItem, Map};
use crate::types::*;

const MAX_DISTINCT_DRAWS: usize = 32;

#[derive(Clone, Copy, Debug)]
pub(crate) struct FloorRequest {
    pub(crate) index: u32,
    pub(crate) forced_up: Option<Pos>,
    pub(crate) forced_down: Option<Pos>,
    pub(crate) spawn: Spawn,
}

/// Where the player lands on a freshly built floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Spawn {
    /// A uniformly random free cell other than the stairs.
    Random,
    /// The up stairs, or the down stairs on a floor without them.
    UpStairs,
}

/// Builds a floor and returns it with the player cell it was seeded around.
pub(crate) fn build_floor(
    request: FloorRequest,
    config: &EngineConfig,
    caps: &mut Capabilities,
) -> (Floor, Pos) {
    let mut map =
        caps.map_generator.generate(config.floor_width, config.floor_height, caps.rng.as_mut());
    let mut free_cells = map.floor_cells();
    if free_cells.is_empty() {
        let centre = Pos::new((map.width / 2) as i32, (map.height / 2) as i32);
        warn!(floor = request.index, %centre, "generator produced no floor, opening centre cell");
        map.set_tile(centre, TileKind::Floor);
        free_cells = map.floor_cells();
    }
    let rng = caps.rng.as_mut();

    let up_stairs = if request.index <= 1 {
        None
    } else {
        Some(match request.forced_up {
            Some(forced) => resolve_forced(&map, &free_cells, forced, None),
            None => pick(rng, &free_cells),
        })
    };
    let down_stairs = match request.forced_down {
        Some(forced) => resolve_forced(&map, &free_cells, forced, up_stairs),
        None => pick_distinct(rng, &free_cells, up_stairs),
    };

    let mut occupied: BTreeSet<Pos> = up_stairs.into_iter().chain([down_stairs]).collect();
    let player = match request.spawn {
        Spawn::Random => {
            random_cell_excluding(rng, &free_cells, &occupied).unwrap_or(down_stairs)
        }
        Spawn::UpStairs => up_stairs.unwrap_or(down_stairs),
    };
    occupied.insert(player);

    let enemies = seed_enemies(rng, config, request.index, &free_cells, &mut occupied);
    let healing_items = seed_potions(rng, config, &free_cells, &mut occupied);
    debug!(
        floor = request.index,
        free_cells = free_cells.len(),
        ?up_stairs,
        %down_stairs,
        enemies = enemies.len(),
        potions = healing_items.len(),
        "generated floor"
    );

    let floor = Floor {
        index: request.index,
        map,
        free_cells,
        up_stairs,
        down_stairs,
        enemies,
        healing_items,
        weapon_items: Vec::new(),
        player_pos: Some(player),
    };
    (floor, player)
}

fn pick(rng: &mut dyn RandomSource, cells: &[Pos]) -> Pos {
    cells[rng.random_index(cells.len())]
}

/// Samples until the cell differs from `other`, giving up after a bounded number of draws.
/// With a single free cell, equality is accepted.
fn pick_distinct(rng: &mut dyn RandomSource, cells: &[Pos], other: Option<Pos>) -> Pos {
    for _ in 0..MAX_DISTINCT_DRAWS {
        let cell = pick(rng, cells);
        if Some(cell) != other {
            return cell;
        }
    }
    debug!(?other, "random source kept repeating a taken cell, using first free cell");
    cells.iter().copied().find(|&cell| Some(cell) != other).unwrap_or(cells[0])
}

/// Exact cell when it is open, otherwise the Euclidean-nearest free cell.
/// Ties go to the earliest cell in generation order.
fn resolve_forced(map: &Map, free_cells: &[Pos], forced: Pos, avoid: Option<Pos>) -> Pos {
    if map.is_floor(forced) && Some(forced) != avoid {
        return forced;
    }
    nearest_to(forced, free_cells.iter().copied().filter(|&cell| Some(cell) != avoid))
        .or_else(|| nearest_to(forced, free_cells.iter().copied()))
        .unwrap_or(forced)
}

fn nearest_to(target: Pos, cells: impl Iterator<Item = Pos>) -> Option<Pos> {
    let mut best: Option<(f64, Pos)> = None;
    for cell in cells {
        let distance = cell.euclidean(target);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

fn random_cell_excluding(
    rng: &mut dyn RandomSource,
    free_cells: &[Pos],
    excluded: &BTreeSet<Pos>,
) -> Option<Pos> {
    let candidates: Vec<Pos> =
        free_cells.iter().copied().filter(|cell| !excluded.contains(cell)).collect();
    if candidates.is_empty() {
        return None;
    }
    Some(pick(rng, &candidates))
}

fn seed_enemies(
    rng: &mut dyn RandomSource,
    config: &EngineConfig,
    floor_index: u32,
    free_cells: &[Pos],
    occupied: &mut BTreeSet<Pos>,
) -> SlotMap<EnemyId, Enemy> {
    let mut enemies = SlotMap::with_key();
    for _ in 0..config.enemies_per_floor {
        let Some(pos) = random_cell_excluding(rng, free_cells, occupied) else {
            debug!(floor = floor_index, placed = enemies.len(), "ran out of cells for enemies");
            break;
        };
        let archetype = EnemyArchetype::ALL[rng.random_index(EnemyArchetype::ALL.len())];
        let hp = config.enemy_hp(archetype, floor_index);
        let id = enemies.insert(Enemy {
            id: EnemyId::default(),
            archetype,
            pos,
            hp,
            max_hp: hp,
            level: floor_index,
            sense_radius: archetype.stats().sense_radius,
            alerted: false,
            selected: false,
        });
        enemies[id].id = id;
        occupied.insert(pos);
    }
    enemies
}

fn seed_potions(
    rng: &mut dyn RandomSource,
    config: &EngineConfig,
    free_cells: &[Pos],
    occupied: &mut BTreeSet<Pos>,
) -> Vec<HealingItem> {
    let mut potions = Vec::new();
    for _ in 0..config.potions_per_floor {
        let Some(pos) = random_cell_excluding(rng, free_cells, occupied) else {
            break;
        };
        potions.push(HealingItem { pos, heal_amount: HEALING_POTION_AMOUNT });
        occupied.insert(pos);
    }
    potions
}
