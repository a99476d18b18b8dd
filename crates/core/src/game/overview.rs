//! Whole-floor snapshot and enemy selection for presentation layers.
//! Nothing here changes the simulation; selection is a display flag only.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub color: &'static str,
}

impl Glyph {
    const fn new(symbol: char, color: &'static str) -> Self {
        Self { symbol, color }
    }
}

/// Row-major glyph grid of the current floor, items and actors drawn over terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorOverview {
    pub floor: u32,
    pub width: usize,
    pub height: usize,
    pub glyphs: Vec<Glyph>,
}

impl FloorOverview {
    pub fn glyph_at(&self, pos: Pos) -> Option<Glyph> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return None;
        }
        self.glyphs.get(pos.y as usize * self.width + pos.x as usize).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.glyphs.chunks(self.width.max(1)).map(|row| row.iter().map(|g| g.symbol).collect())
    }
}

impl Game {
    /// Flips overview mode and returns the new setting.
    pub fn toggle_overview(&mut self) -> bool {
        self.overview_mode = !self.overview_mode;
        self.overview_mode
    }

    pub fn is_overview_mode(&self) -> bool {
        self.overview_mode
    }

    pub fn overview(&self) -> FloorOverview {
        let floor = self.current_floor();
        let map = &floor.map;
        let mut glyphs = Vec::with_capacity(map.width * map.height);
        for tile in &map.tiles {
            glyphs.push(match tile {
                TileKind::Wall => Glyph::new('#', "grey"),
                TileKind::Floor => Glyph::new('.', "lightgrey"),
            });
        }
        let mut draw = |pos: Pos, glyph: Glyph| {
            if map.in_bounds(pos) {
                glyphs[pos.y as usize * map.width + pos.x as usize] = glyph;
            }
        };
        if let Some(up) = floor.up_stairs {
            draw(up, Glyph::new('<', "lightblue"));
        }
        draw(floor.down_stairs, Glyph::new('>', "lightblue"));
        for potion in &floor.healing_items {
            draw(potion.pos, Glyph::new('!', "green"));
        }
        for weapon in &floor.weapon_items {
            draw(weapon.pos, Glyph::new(weapon.symbol, weapon.color));
        }
        for enemy in floor.enemies.values() {
            let stats = enemy.archetype.stats();
            draw(enemy.pos, Glyph::new(stats.symbol, stats.color));
        }
        draw(self.player.pos, Glyph::new('@', "yellow"));

        FloorOverview { floor: floor.index, width: map.width, height: map.height, glyphs }
    }

    /// Selects the enemy on `pos`, clearing any previous selection.
    /// A miss clears every selection and returns `None`.
    pub fn select_enemy_at(&mut self, pos: Pos) -> Option<EnemyStatus> {
        let mut selected = None;
        for enemy in self.floor_mut().enemies.values_mut() {
            enemy.selected = enemy.pos == pos;
            if enemy.selected {
                selected = Some(enemy.status());
            }
        }
        selected
    }

    pub fn selected_enemy(&self) -> Option<EnemyStatus> {
        self.current_floor().enemies.values().find(|enemy| enemy.selected).map(|e| e.status())
    }
}
