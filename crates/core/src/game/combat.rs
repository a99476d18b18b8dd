//! Attack exchanges, item pickup, and inventory actions.
//! This module exists to keep damage and inventory arithmetic out of movement resolution.
//! It does not own experience thresholds or enemy targeting.

use tracing::{debug, info};

use super::*;
use crate::capabilities::RandomSource;
use crate::content::{ENEMY_ATTACK_DAMAGE, ENEMY_TAUNTS, EXP_PER_KILL, PLAYER_BASE_DAMAGE};
use crate::state::WeaponItem;

impl Game {
    /// Strikes `enemy` once. Returns whether the blow was fatal.
    pub fn player_attack(&mut self, enemy: EnemyId) -> Result<bool, CommandError> {
        self.ensure_running()?;
        let damage = PLAYER_BASE_DAMAGE + self.player.equipped().map_or(0, |w| w.damage_bonus);
        let target = self.floor_mut().enemies.get_mut(enemy).ok_or(CommandError::UnknownEnemy)?;
        target.hp -= damage;
        let (remaining_hp, archetype, pos) = (target.hp, target.archetype, target.pos);
        debug!(?enemy, damage, remaining_hp, "player attack");
        self.emit(GameEvent::EnemyDamaged { enemy, damage, remaining_hp });
        if remaining_hp > 0 {
            return Ok(false);
        }

        self.floor_mut().enemies.remove(enemy);
        self.emit(GameEvent::EnemyDefeated { enemy, archetype, pos });
        self.gain_experience(EXP_PER_KILL);
        if let Some(template) = archetype.stats().drop {
            let weapon = WeaponItem::from_template(&template, pos);
            let name = weapon.name.clone();
            self.floor_mut().weapon_items.push(weapon);
            debug!(%name, %pos, "enemy dropped weapon");
            self.emit(GameEvent::WeaponDropped { name, pos });
        }
        Ok(true)
    }

    pub(super) fn enemy_attack(&mut self, enemy: EnemyId) {
        let taunt = ENEMY_TAUNTS[self.caps.rng.random_index(ENEMY_TAUNTS.len())];
        self.player.hp -= ENEMY_ATTACK_DAMAGE;
        let hp = self.player.hp;
        debug!(?enemy, hp, "enemy attack");
        self.emit(GameEvent::PlayerDamaged { enemy, amount: ENEMY_ATTACK_DAMAGE, hp, taunt });
        if self.player.is_dead() && !self.game_over {
            self.game_over = true;
            info!(floor = self.current_floor, level = self.player.level, "player died");
            self.emit(GameEvent::GameOver);
        }
    }

    /// Moves every item on the player's cell into the inventory, oldest first.
    pub fn check_pickup(&mut self) -> Vec<PickedItem> {
        let pos = self.player.pos;
        let floor = self.floor_mut();
        let (potions, kept_potions): (Vec<_>, Vec<_>) =
            floor.healing_items.drain(..).partition(|item| item.pos == pos);
        floor.healing_items = kept_potions;
        let (weapons, kept_weapons): (Vec<_>, Vec<_>) =
            floor.weapon_items.drain(..).partition(|item| item.pos == pos);
        floor.weapon_items = kept_weapons;

        let mut picked = Vec::new();
        for potion in potions {
            picked.push(PickedItem::HealingPotion { heal_amount: potion.heal_amount });
            self.player.potions.push_back(potion);
        }
        for weapon in weapons {
            picked.push(PickedItem::Weapon {
                name: weapon.name.clone(),
                damage_bonus: weapon.damage_bonus,
            });
            self.player.weapons.push(weapon);
        }
        for item in &picked {
            debug!(?item, %pos, "picked up");
            self.emit(GameEvent::ItemPickedUp { item: item.clone() });
        }
        picked
    }

    /// Drinks the oldest potion. Returns the new hit points.
    pub fn use_healing_item(&mut self) -> Result<i32, CommandError> {
        self.ensure_running()?;
        let potion = self.player.potions.pop_front().ok_or(CommandError::NoItem)?;
        let hp_before = self.player.hp;
        self.player.hp = hp_before.saturating_add(potion.heal_amount).min(self.player.max_hp);
        let hp_after = self.player.hp;
        self.emit(GameEvent::PotionUsed { hp_before, hp_after });
        Ok(hp_after)
    }

    pub fn equip_weapon(&mut self, index: usize) -> Result<(), CommandError> {
        self.ensure_running()?;
        let len = self.player.weapons.len();
        if len == 0 {
            return Err(CommandError::NoWeapons);
        }
        let Some(weapon) = self.player.weapons.get(index) else {
            return Err(CommandError::InvalidIndex { index, len });
        };
        let name = weapon.name.clone();
        self.player.equipped_weapon = Some(index);
        self.emit(GameEvent::WeaponEquipped { index, name });
        Ok(())
    }
}
