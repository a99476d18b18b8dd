//! Single-step movement resolution against stairs, enemies, and terrain.
//! This module exists to keep the precedence order of a move in one function.
//! It does not own attack arithmetic or enemy decision making.

use super::*;

impl Game {
    /// Resolves one cardinal step of player input.
    ///
    /// Stairs win over everything, then an enemy in the target cell is attacked in place,
    /// then walls stop the move. A completed move checks pickup and lets every enemy act.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Result<MoveOutcome, CommandError> {
        self.ensure_running()?;
        if Direction::from_delta(dx, dy).is_none() {
            return Err(CommandError::InvalidDirection { dx, dy });
        }
        let target = self.player.pos.offset(dx, dy);
        let floor = self.current_floor();

        if let Some(direction) = floor.stair_direction_at(target) {
            let from = self.current_floor;
            return Ok(if self.change_floor(direction)? {
                MoveOutcome::ChangedFloor { from, to: self.current_floor }
            } else {
                MoveOutcome::Blocked
            });
        }

        if let Some(enemy) = floor.enemy_at(target) {
            let defeated = self.player_attack(enemy)?;
            return Ok(MoveOutcome::Attacked { enemy, defeated });
        }

        if !floor.is_walkable(target) {
            return Ok(MoveOutcome::Blocked);
        }

        self.player.pos = target;
        self.record_player_position();
        self.check_pickup();
        self.tick_enemies();
        Ok(MoveOutcome::Moved { to: target })
    }

    pub fn move_in(&mut self, direction: Direction) -> Result<MoveOutcome, CommandError> {
        let (dx, dy) = direction.delta();
        self.move_player(dx, dy)
    }
}
