//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    /// Hash of simulation state. Presentation flags and the event log are left out.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.current_floor);
        hasher.write_u8(u8::from(self.game_over));

        let player = &self.player;
        write_pos(&mut hasher, player.pos);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.max_hp);
        hasher.write_u32(player.level);
        hasher.write_i32(player.exp);
        hasher.write_i32(player.next_exp);
        hasher.write_usize(player.potions.len());
        for weapon in &player.weapons {
            hasher.write(weapon.name.as_bytes());
        }
        hasher.write_usize(player.equipped_weapon.map_or(usize::MAX, |index| index));

        for (index, floor) in &self.floors {
            hasher.write_u32(*index);
            if let Some(up) = floor.up_stairs {
                write_pos(&mut hasher, up);
            }
            write_pos(&mut hasher, floor.down_stairs);
            for enemy in floor.enemies.values() {
                write_pos(&mut hasher, enemy.pos);
                hasher.write_i32(enemy.hp);
                hasher.write_u8(u8::from(enemy.alerted));
            }
            for potion in &floor.healing_items {
                write_pos(&mut hasher, potion.pos);
            }
            for weapon in &floor.weapon_items {
                write_pos(&mut hasher, weapon.pos);
                hasher.write(weapon.name.as_bytes());
            }
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}
