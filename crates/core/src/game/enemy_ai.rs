//! Per-move enemy decisions: alerting, adjacent attacks, and pursuit steps.
//! This module exists to keep the alert state machine separate from combat arithmetic.
//! It does not own path search internals or damage rules.

use tracing::trace;

use super::*;

impl Game {
    /// Gives every enemy on the current floor one turn, in slot order.
    pub(super) fn tick_enemies(&mut self) {
        let ids: Vec<EnemyId> = self.current_floor().enemies.keys().collect();
        for id in ids {
            if self.game_over {
                break;
            }
            self.tick_enemy(id);
        }
    }

    fn tick_enemy(&mut self, id: EnemyId) {
        let player_pos = self.player.pos;
        let Some(floor) = self.floors.get_mut(&self.current_floor) else {
            return;
        };
        let Some(enemy) = floor.enemies.get_mut(id) else {
            return;
        };
        if !enemy.alerted {
            if enemy.pos.euclidean(player_pos) > enemy.sense_radius {
                return;
            }
            enemy.alerted = true;
            trace!(?id, pos = %enemy.pos, "enemy alerted");
            self.events.push(GameEvent::EnemyAlerted { enemy: id, archetype: enemy.archetype });
        }
        let enemy_pos = enemy.pos;

        if enemy_pos.chebyshev(player_pos) <= 1 {
            self.enemy_attack(id);
            return;
        }

        let floor = self.current_floor();
        let path = self.caps.pathfinder.find_path(
            &|p| floor.map.is_floor(p),
            enemy_pos,
            player_pos,
            Topology::Eight,
        );
        let Some(&next) = path.get(1) else {
            trace!(?id, "no path to player");
            return;
        };
        if next == player_pos
            || floor.enemy_at(next).is_some()
            || floor.stair_direction_at(next).is_some()
        {
            return;
        }
        trace!(?id, from = %enemy_pos, to = %next, "enemy steps");
        self.floor_mut().enemies[id].pos = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EnemyArchetype;
    use crate::game::test_support::*;
    use crate::state::Map;

    fn room() -> Game {
        game_with_map(Map::new(30, 12), Pos::new(28, 10), Pos::new(5, 5))
    }

    #[test]
    fn distant_enemy_stays_dormant() {
        let mut game = room();
        let goblin = add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(20, 5));
        game.tick_enemies();
        let enemy = &game.current_floor().enemies[goblin];
        assert!(!enemy.is_alerted());
        assert_eq!(enemy.pos, Pos::new(20, 5));
    }

    #[test]
    fn enemy_within_sense_radius_alerts_and_closes_in() {
        let mut game = room();
        let goblin = add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(11, 5));
        game.tick_enemies();
        let enemy = &game.current_floor().enemies[goblin];
        assert!(enemy.is_alerted());
        assert_eq!(enemy.pos.x, 10);
        assert_eq!(enemy.pos.chebyshev(Pos::new(5, 5)), 5);
    }

    #[test]
    fn alert_is_permanent_once_triggered() {
        let mut game = room();
        let goblin = add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(11, 5));
        game.tick_enemies();
        place_player(&mut game, Pos::new(1, 1));
        game.floor_mut().enemies[goblin].pos = Pos::new(27, 10);
        game.tick_enemies();
        let enemy = &game.current_floor().enemies[goblin];
        assert!(enemy.is_alerted());
        assert_ne!(enemy.pos, Pos::new(27, 10), "alerted enemy keeps pursuing from afar");
    }

    #[test]
    fn adjacent_alerted_enemy_attacks_diagonally() {
        let mut game = room();
        add_enemy(&mut game, EnemyArchetype::Troll, Pos::new(6, 6));
        game.tick_enemies();
        assert_eq!(game.player().hp, 17);
        assert!(
            game.events().iter().any(|e| matches!(e, GameEvent::PlayerDamaged { amount: 3, .. }))
        );
    }

    #[test]
    fn unreachable_player_means_no_movement() {
        let mut map = Map::new(30, 12);
        for y in 0..12 {
            map.set_tile(Pos::new(8, y), TileKind::Wall);
        }
        let mut game = game_with_map(map, Pos::new(28, 10), Pos::new(5, 5));
        let orc = add_enemy(&mut game, EnemyArchetype::Orc, Pos::new(11, 5));
        game.tick_enemies();
        let enemy = &game.current_floor().enemies[orc];
        assert!(enemy.is_alerted());
        assert_eq!(enemy.pos, Pos::new(11, 5));
    }

    #[test]
    fn enemies_do_not_stack_on_one_cell() {
        let mut map = Map::filled(20, 5, TileKind::Wall);
        for x in 1..19 {
            map.set_tile(Pos::new(x, 2), TileKind::Floor);
        }
        let mut game = game_with_map(map, Pos::new(18, 2), Pos::new(2, 2));
        let front = add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(6, 2));
        let back = add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(7, 2));
        game.floor_mut().enemies[front].hp = 100;
        game.floor_mut().enemies[back].hp = 100;
        for _ in 0..4 {
            game.tick_enemies();
        }
        let floor = game.current_floor();
        assert_ne!(floor.enemies[front].pos, floor.enemies[back].pos);
        assert_eq!(floor.enemies[front].pos, Pos::new(3, 2));
        assert_eq!(floor.enemies[back].pos, Pos::new(4, 2));
    }

    #[test]
    fn pursuit_halts_before_stair_cells() {
        let mut game = game_with_map(corridor_map(18), Pos::new(10, 2), Pos::new(2, 2));
        let troll = add_enemy(&mut game, EnemyArchetype::Troll, Pos::new(11, 2));
        game.tick_enemies();
        let enemy = &game.current_floor().enemies[troll];
        assert!(enemy.is_alerted());
        assert_eq!(enemy.pos, Pos::new(11, 2));
    }

    #[test]
    fn lethal_hit_stops_remaining_enemies() {
        let mut game = room();
        set_player_hp(&mut game, 3);
        add_enemy(&mut game, EnemyArchetype::Goblin, Pos::new(6, 5));
        add_enemy(&mut game, EnemyArchetype::Orc, Pos::new(4, 5));
        game.tick_enemies();
        assert!(game.is_game_over());
        assert_eq!(game.player().hp, 0);
        let hits =
            game.events().iter().filter(|e| matches!(e, GameEvent::PlayerDamaged { .. })).count();
        assert_eq!(hits, 1);
    }
}
