//! Experience accrual and level-up thresholds.

use tracing::info;

use super::*;
use crate::content::LEVEL_UP_MAX_HP_GAIN;

impl Game {
    /// Adds experience, levelling up once per threshold crossed.
    /// Each level raises max HP, fully heals, and grows the next threshold by half.
    pub fn gain_experience(&mut self, amount: i32) {
        self.player.exp = self.player.exp.saturating_add(amount);
        self.emit(GameEvent::ExperienceGained { amount });
        while self.player.exp >= self.player.next_exp {
            let player = &mut self.player;
            player.exp -= player.next_exp;
            player.level += 1;
            player.next_exp =
                i32::try_from(i64::from(player.next_exp) * 3 / 2).unwrap_or(i32::MAX);
            player.max_hp = player.max_hp.saturating_add(LEVEL_UP_MAX_HP_GAIN);
            player.hp = player.max_hp;
            let (level, max_hp) = (player.level, player.max_hp);
            info!(level, max_hp, next_exp = player.next_exp, "level up");
            self.emit(GameEvent::LevelUp { level, max_hp });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;
    use crate::state::Map;

    fn fresh() -> Game {
        game_with_map(Map::new(10, 8), Pos::new(8, 6), Pos::new(2, 2))
    }

    #[test]
    fn forty_five_exp_crosses_one_threshold() {
        let mut game = fresh();
        set_player_hp(&mut game, 7);
        game.gain_experience(45);
        let player = game.player();
        // 45 - 20 leaves 25, which is still short of the next threshold of 30
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 25);
        assert_eq!(player.next_exp, 30);
        assert_eq!(player.max_hp, 25);
        assert_eq!(player.hp, 25);
    }

    #[test]
    fn one_grant_can_cross_several_thresholds() {
        let mut game = fresh();
        game.gain_experience(20 + 30 + 45 + 1);
        let player = game.player();
        assert_eq!(player.level, 4);
        assert_eq!(player.exp, 1);
        assert_eq!(player.next_exp, 67);
        assert_eq!(player.max_hp, 35);
        let level_ups =
            game.events().iter().filter(|e| matches!(e, GameEvent::LevelUp { .. })).count();
        assert_eq!(level_ups, 3);
    }

    #[test]
    fn exact_threshold_levels_up_with_zero_remainder() {
        let mut game = fresh();
        game.gain_experience(20);
        assert_eq!((game.player().level, game.player().exp), (2, 0));
    }

    #[test]
    fn small_grant_only_accumulates() {
        let mut game = fresh();
        game.gain_experience(10);
        game.gain_experience(9);
        let player = game.player();
        assert_eq!((player.level, player.exp, player.max_hp), (1, 19, 20));
    }

    #[test]
    fn huge_values_saturate_instead_of_overflowing() {
        let mut game = fresh();
        game.player.max_hp = i32::MAX - 1;
        game.player.next_exp = i32::MAX - 1;
        game.gain_experience(i32::MAX);
        let player = game.player();
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 1);
        assert_eq!(player.next_exp, i32::MAX);
        assert_eq!((player.max_hp, player.hp), (i32::MAX, i32::MAX));
    }
}
