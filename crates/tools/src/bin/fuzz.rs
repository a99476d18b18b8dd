use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use delve_core::{Command, CommandJournal, Direction, Game, Pos};
use delve_tools::{init_tracing, load_config, save_journal};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 1000)]
    commands: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the played commands here for later replay
    #[arg(long)]
    save: Option<PathBuf>,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_command(rng: &mut ChaCha8Rng, player: Pos) -> Command {
    let direction = choose(rng, &Direction::ALL);
    match rng.next_u64() % 16 {
        0 => Command::UseHealingItem,
        1 => Command::EquipWeapon { index: choose(rng, &[0, 1, 2]) },
        2 => Command::AutoRun { direction },
        3 => Command::ToggleOverview,
        4 => Command::select(player.offset(choose(rng, &[-1, 0, 1]), choose(rng, &[-1, 0, 1]))),
        // Bias to walking
        _ => Command::step(direction),
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    let player = game.player();
    let floor = game.current_floor();
    if player.hp > player.max_hp {
        bail!("player HP {} above max {}", player.hp, player.max_hp);
    }
    if !floor.map.is_floor(player.pos) {
        bail!("player inside wall at {}", player.pos);
    }
    let mut occupied = BTreeSet::from([player.pos]);
    for enemy in floor.enemies.values() {
        if !floor.map.is_floor(enemy.pos) {
            bail!("enemy inside wall at {}", enemy.pos);
        }
        if !occupied.insert(enemy.pos) {
            bail!("two actors share {}", enemy.pos);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("warn");

    println!("Starting Fuzz harness on seed {} for max {} commands...", args.seed, args.commands);
    let config = load_config(args.config.as_deref())?;
    let mut game = Game::with_config(args.seed, config)?;
    let mut journal = CommandJournal::new(args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for issued in 0..args.commands {
        let command = random_command(&mut rng, game.player().pos);
        journal.push(command.clone());
        let _ = game.apply(&command);
        if let Err(err) = check_invariants(&game) {
            warn!(issued, ?command, "invariant broken");
            if let Some(path) = &args.save {
                save_journal(path, &journal)?;
            }
            return Err(err.context(format!("seed {} after {} commands", args.seed, issued + 1)));
        }
        if game.is_game_over() {
            println!("Game over on floor {} after {} commands", game.current_floor_index(), issued + 1);
            break;
        }
    }

    if let Some(path) = &args.save {
        save_journal(path, &journal)?;
    }
    println!("Fuzzing completed without invariant violations.");
    println!("Final Floor: {}", game.current_floor_index());
    println!("Snapshot Hash: {:016x}", game.snapshot_hash());
    Ok(())
}
