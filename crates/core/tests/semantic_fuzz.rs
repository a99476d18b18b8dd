use std::collections::BTreeSet;

use delve_core::{
    Command, CommandError, CommandOutcome, Direction, EngineConfig, EnemyId, Game, MoveOutcome,
    Pos,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn random_command(rng: &mut ChaCha8Rng, game: &Game) -> Command {
    let direction = Direction::ALL[(rng.next_u64() % 4) as usize];
    match rng.next_u64() % 20 {
        0 => Command::UseHealingItem,
        1 => Command::EquipWeapon { index: (rng.next_u64() % 3) as usize },
        2 => Command::AutoRun { direction },
        3 => Command::ToggleOverview,
        4 => {
            let dx = (rng.next_u64() % 5) as i32 - 2;
            let dy = (rng.next_u64() % 5) as i32 - 2;
            Command::select(game.player().pos.offset(dx, dy))
        }
        _ => Command::step(direction),
    }
}

fn check_invariants(
    game: &Game,
    alerted: &mut BTreeSet<(u32, EnemyId)>,
    seed: u64,
) -> Result<(), String> {
    let player = game.player();
    if player.hp > player.max_hp {
        return Err(format!("Invariant failed: player HP above max on seed {seed}"));
    }
    if game.is_game_over() != (player.hp <= 0) {
        return Err(format!("Invariant failed: game over flag disagrees with HP on seed {seed}"));
    }
    let floor = game.current_floor();
    if !floor.map.is_floor(player.pos) {
        return Err(format!("Invariant failed: player inside wall at {} on seed {seed}", player.pos));
    }

    let mut occupied = BTreeSet::from([player.pos]);
    for enemy in floor.enemies.values() {
        if enemy.hp > enemy.max_hp || enemy.hp <= 0 {
            return Err(format!("Invariant failed: enemy HP out of range on seed {seed}"));
        }
        if !floor.map.is_floor(enemy.pos) {
            return Err(format!("Invariant failed: enemy inside wall on seed {seed}"));
        }
        if !occupied.insert(enemy.pos) {
            return Err(format!("Invariant failed: shared cell {} on seed {seed}", enemy.pos));
        }
    }

    for index in 1..=game.generated_floor_count() as u32 {
        let Some(floor) = game.floor(index) else { continue };
        for &(_, id) in alerted.iter().filter(|(f, _)| *f == index) {
            if floor.enemies.get(id).is_some_and(|enemy| !enemy.is_alerted()) {
                return Err(format!("Invariant failed: enemy lost its alert on seed {seed}"));
            }
        }
        for (id, enemy) in &floor.enemies {
            if enemy.is_alerted() {
                alerted.insert((index, id));
            }
        }
    }
    Ok(())
}

fn item_under(game: &Game, pos: Pos) -> bool {
    let floor = game.current_floor();
    floor.healing_items.iter().any(|item| item.pos == pos)
        || floor.weapon_items.iter().any(|item| item.pos == pos)
}

fn run_fuzz_simulation(seed: u64, input_seed: u64, max_commands: u32) -> Result<(), String> {
    let config = EngineConfig { floor_width: 60, floor_height: 24, ..EngineConfig::default() };
    let mut game = Game::with_config(seed, config).map_err(|err| err.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    let mut alerted = BTreeSet::new();

    for _ in 0..max_commands {
        let command = random_command(&mut rng, &game);
        let result = game.apply(&command);
        if let Ok(CommandOutcome::Moved(MoveOutcome::Moved { to })) = result
            && to == game.player().pos
            && item_under(&game, to)
        {
            return Err(format!("Invariant failed: item left under the player on seed {seed}"));
        }
        check_invariants(&game, &mut alerted, seed)?;
        if game.is_game_over() {
            break;
        }
    }

    if game.is_game_over() {
        let hash = game.snapshot_hash();
        for direction in Direction::ALL {
            if game.move_in(direction) != Err(CommandError::GameOver) {
                return Err(format!("Invariant failed: move accepted after death on seed {seed}"));
            }
        }
        if game.use_healing_item() != Err(CommandError::GameOver) {
            return Err(format!("Invariant failed: potion accepted after death on seed {seed}"));
        }
        if game.snapshot_hash() != hash {
            return Err(format!("Invariant failed: state changed after death on seed {seed}"));
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_game_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(16));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(seed, input_seed)| {
            run_fuzz_simulation(seed, input_seed, 600).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
