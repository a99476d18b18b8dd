use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use tracing::info;

use crate::capabilities::Capabilities;
use crate::config::{ConfigError, EngineConfig};
use crate::floor::{FloorRequest, Spawn, build_floor};
use crate::state::{Floor, Player};
use crate::types::*;

mod auto_run;
mod combat;
mod commands;
mod enemy_ai;
mod floor_transition;
mod hash;
mod movement;
mod overview;
mod progression;

#[cfg(test)]
pub(crate) mod test_support;

pub use auto_run::{AutoRun, AutoRunStep, AutoRunStop, AutoRunSummary, CancelHandle};
pub use commands::CommandOutcome;
pub use overview::{FloorOverview, Glyph};

/// One play session: the floor registry, the persistent player, and the terminal flag.
pub struct Game {
    seed: u64,
    config: EngineConfig,
    caps: Capabilities,
    floors: BTreeMap<u32, Floor>,
    current_floor: u32,
    player: Player,
    game_over: bool,
    overview_mode: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::build(seed, EngineConfig::default(), Capabilities::seeded(seed))
    }

    pub fn with_config(seed: u64, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_capabilities(seed, config, Capabilities::seeded(seed))
    }

    /// `seed` identifies the run in journals and hashes; randomness comes from `caps`.
    pub fn with_capabilities(
        seed: u64,
        config: EngineConfig,
        caps: Capabilities,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config, caps))
    }

    fn build(seed: u64, config: EngineConfig, mut caps: Capabilities) -> Self {
        let request =
            FloorRequest { index: 1, forced_up: None, forced_down: None, spawn: Spawn::Random };
        let (floor, spawn) = build_floor(request, &config, &mut caps);
        let player = Player::new(spawn, config.player_start_hp, config.first_level_threshold);
        info!(seed, %spawn, width = config.floor_width, height = config.floor_height, "new game");
        Self {
            seed,
            config,
            caps,
            floors: BTreeMap::from([(1, floor)]),
            current_floor: 1,
            player,
            game_over: false,
            overview_mode: false,
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_floor_index(&self) -> u32 {
        self.current_floor
    }

    pub fn current_floor(&self) -> &Floor {
        self.floors.get(&self.current_floor).expect("current floor is always generated")
    }

    pub fn floor(&self, index: u32) -> Option<&Floor> {
        self.floors.get(&index)
    }

    pub fn generated_floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Cells in view from the player's position on the current floor.
    pub fn visible_cells(&self) -> BTreeSet<Pos> {
        let map = &self.current_floor().map;
        self.caps.visibility.compute_visible(
            &|p| !map.is_floor(p),
            self.player.pos,
            self.config.fov_radius,
        )
    }

    pub fn enemy_in_view(&self) -> bool {
        let visible = self.visible_cells();
        self.current_floor().enemies.values().any(|enemy| visible.contains(&enemy.pos))
    }

    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            floor: self.current_floor,
            level: self.player.level,
            exp: self.player.exp,
            next_exp: self.player.next_exp,
            potions: self.player.potions.len(),
            weapon: self.player.equipped().map(|weapon| weapon.name.clone()),
        }
    }

    fn floor_mut(&mut self) -> &mut Floor {
        self.floors.get_mut(&self.current_floor).expect("current floor is always generated")
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.game_over { Err(CommandError::GameOver) } else { Ok(()) }
    }
}
