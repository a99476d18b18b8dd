//! Dispatch of journaled commands onto the engine's command surface.

use super::*;
use crate::journal::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved(MoveOutcome),
    Healed { hp: i32 },
    Equipped { index: usize },
    AutoRan(AutoRunSummary),
    OverviewToggled { enabled: bool },
    Selected(Option<EnemyStatus>),
}

impl Game {
    pub fn apply(&mut self, command: &Command) -> Result<CommandOutcome, CommandError> {
        match *command {
            Command::Move { dx, dy } => self.move_player(dx, dy).map(CommandOutcome::Moved),
            Command::UseHealingItem => {
                self.use_healing_item().map(|hp| CommandOutcome::Healed { hp })
            }
            Command::EquipWeapon { index } => {
                self.equip_weapon(index).map(|()| CommandOutcome::Equipped { index })
            }
            Command::AutoRun { direction } => self.auto_run(direction).map(CommandOutcome::AutoRan),
            Command::ToggleOverview => {
                Ok(CommandOutcome::OverviewToggled { enabled: self.toggle_overview() })
            }
            Command::SelectEnemy { x, y } => {
                Ok(CommandOutcome::Selected(self.select_enemy_at(Pos::new(x, y))))
            }
        }
    }
}
