use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::content::{EnemyArchetype, WeaponTemplate};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    /// Open room with a one-tile wall border.
    pub fn new(width: usize, height: usize) -> Self {
        let mut map = Self::filled(width, height, TileKind::Floor);
        for x in 0..width {
            map.tiles[x] = TileKind::Wall;
            map.tiles[(height - 1) * width + x] = TileKind::Wall;
        }
        for y in 0..height {
            map.tiles[y * width] = TileKind::Wall;
            map.tiles[y * width + (width - 1)] = TileKind::Wall;
        }
        map
    }

    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    /// Floor cells in row-major order.
    pub fn floor_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                if self.is_floor(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// Number of the eight surrounding cells that are floor.
    pub fn open_neighbor_count(&self, pos: Pos) -> usize {
        pos.neighbors8().into_iter().filter(|&n| self.is_floor(n)).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealingItem {
    pub pos: Pos,
    pub heal_amount: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponItem {
    pub pos: Pos,
    pub name: String,
    pub damage_bonus: i32,
    pub symbol: char,
    pub color: &'static str,
}

impl WeaponItem {
    pub fn from_template(template: &WeaponTemplate, pos: Pos) -> Self {
        Self {
            pos,
            name: template.name.to_string(),
            damage_bonus: template.damage_bonus,
            symbol: template.symbol,
            color: template.color,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub archetype: EnemyArchetype,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub sense_radius: f64,
    pub(crate) alerted: bool,
    pub selected: bool,
}

impl Enemy {
    pub fn is_alerted(&self) -> bool {
        self.alerted
    }

    pub fn status(&self) -> EnemyStatus {
        EnemyStatus {
            id: self.id,
            name: self.archetype.stats().name,
            hp: self.hp,
            max_hp: self.max_hp,
            level: self.level,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub exp: i32,
    pub next_exp: i32,
    pub potions: VecDeque<HealingItem>,
    pub weapons: Vec<WeaponItem>,
    /// Index into `weapons`. Weapons are never removed, so the index stays valid.
    pub equipped_weapon: Option<usize>,
}

impl Player {
    pub fn new(pos: Pos, hp: i32, first_threshold: i32) -> Self {
        Self {
            pos,
            hp,
            max_hp: hp,
            level: 1,
            exp: 0,
            next_exp: first_threshold,
            potions: VecDeque::new(),
            weapons: Vec::new(),
            equipped_weapon: None,
        }
    }

    pub fn equipped(&self) -> Option<&WeaponItem> {
        self.equipped_weapon.and_then(|index| self.weapons.get(index))
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

#[derive(Clone, Debug)]
pub struct Floor {
    pub index: u32,
    pub map: Map,
    /// Every floor cell in generation order.
    pub free_cells: Vec<Pos>,
    pub up_stairs: Option<Pos>,
    pub down_stairs: Pos,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub healing_items: Vec<HealingItem>,
    pub weapon_items: Vec<WeaponItem>,
    /// Where the player last stood on this floor.
    pub player_pos: Option<Pos>,
}

impl Floor {
    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.pos == pos).map(|(id, _)| id)
    }

    pub fn stair_direction_at(&self, pos: Pos) -> Option<StairDirection> {
        if pos == self.down_stairs {
            Some(StairDirection::Down)
        } else if self.up_stairs == Some(pos) {
            Some(StairDirection::Up)
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.map.is_floor(pos)
    }
}
