//! Floor registry access and stair transitions.
//! This module exists to keep stair alignment and floor caching in one place.
//! It does not own floor construction rules or movement resolution.

use super::*;

impl Game {
    /// Enters floor `index`, building it on first visit and reusing the cached floor afterwards.
    ///
    /// A cached floor is returned untouched and the player is moved to the position last
    /// recorded on it. A fresh floor places the player on its up stairs. Forced stair cells
    /// only matter when the floor is built fresh.
    pub fn generate_or_load(
        &mut self,
        index: u32,
        forced_up: Option<Pos>,
        forced_down: Option<Pos>,
    ) -> &Floor {
        let index = index.max(1);
        self.current_floor = index;
        match self.floors.get(&index) {
            Some(floor) => {
                if let Some(saved) = floor.player_pos {
                    self.player.pos = saved;
                }
            }
            None => {
                let request =
                    FloorRequest { index, forced_up, forced_down, spawn: Spawn::UpStairs };
                let (floor, spawn) = build_floor(request, &self.config, &mut self.caps);
                self.player.pos = spawn;
                self.floors.insert(index, floor);
            }
        }
        self.current_floor()
    }

    /// Takes the stairs in `direction`. Returns `Ok(false)` when going up from floor 1.
    pub fn change_floor(&mut self, direction: StairDirection) -> Result<bool, CommandError> {
        self.ensure_running()?;
        if direction == StairDirection::Up && self.current_floor <= 1 {
            return Ok(false);
        }
        self.record_player_position();

        let from = self.current_floor;
        let current = self.current_floor();
        let (to, forced_up, forced_down) = match direction {
            StairDirection::Down => (from + 1, Some(current.down_stairs), None),
            StairDirection::Up => (from - 1, None, current.up_stairs),
        };
        let floor = self.generate_or_load(to, forced_up, forced_down);
        let arrival = match direction {
            StairDirection::Down => floor.up_stairs.unwrap_or(floor.down_stairs),
            StairDirection::Up => floor.down_stairs,
        };
        self.player.pos = arrival;
        self.record_player_position();

        self.emit(GameEvent::FloorChanged { from, to, direction });
        info!(from, to, ?direction, %arrival, "changed floor");
        Ok(true)
    }

    pub(super) fn record_player_position(&mut self) {
        let pos = self.player.pos;
        self.floor_mut().player_pos = Some(pos);
    }
}
