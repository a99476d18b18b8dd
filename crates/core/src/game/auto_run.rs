//! Cancelable repeated movement in one direction.
//! This module exists to model the delayed re-stepping of a run as an explicit task.
//! It does not own timers; callers decide how to wait between steps.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use super::*;

/// Shared stop flag. Cloning hands out another handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoRunStop {
    Cancelled,
    GameOver,
    EnemyInSight,
    /// More than two of the eight surrounding cells are open.
    Junction,
    Blocked,
    /// Safety cap of one floor's worth of cells.
    StepLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoRunStep {
    Continue { after: Duration },
    Stopped(AutoRunStop),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoRunSummary {
    pub steps: usize,
    pub reason: AutoRunStop,
}

#[derive(Debug)]
pub struct AutoRun {
    direction: Direction,
    step_delay: Duration,
    cancel: CancelHandle,
    steps: usize,
    stopped: Option<AutoRunStop>,
}

impl AutoRun {
    pub fn new(direction: Direction, step_delay: Duration) -> Self {
        Self { direction, step_delay, cancel: CancelHandle::default(), steps: 0, stopped: None }
    }

    /// Run paced by the configured step delay.
    pub fn for_game(direction: Direction, game: &Game) -> Self {
        Self::new(direction, game.config().auto_run_step())
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Takes one step unless the run is cancelled or already stopped.
    ///
    /// The guard runs before any state is touched, so a cancel issued during the wait
    /// between steps always prevents the next move.
    pub fn step(&mut self, game: &mut Game) -> AutoRunStep {
        if let Some(reason) = self.stopped {
            return AutoRunStep::Stopped(reason);
        }
        if self.cancel.is_cancelled() {
            return self.stop(AutoRunStop::Cancelled);
        }
        if game.is_game_over() {
            return self.stop(AutoRunStop::GameOver);
        }

        match game.move_in(self.direction) {
            Ok(MoveOutcome::Blocked) => return self.stop(AutoRunStop::Blocked),
            Ok(_) => self.steps += 1,
            Err(CommandError::GameOver) => return self.stop(AutoRunStop::GameOver),
            Err(_) => return self.stop(AutoRunStop::Blocked),
        }

        if game.is_game_over() {
            return self.stop(AutoRunStop::GameOver);
        }
        if game.enemy_in_view() {
            return self.stop(AutoRunStop::EnemyInSight);
        }
        if game.current_floor().map.open_neighbor_count(game.player().pos) > 2 {
            return self.stop(AutoRunStop::Junction);
        }
        let limit = game.config().floor_width * game.config().floor_height;
        if self.steps >= limit {
            return self.stop(AutoRunStop::StepLimit);
        }
        AutoRunStep::Continue { after: self.step_delay }
    }

    /// Drives the run to completion, calling `wait` between steps.
    pub fn run(mut self, game: &mut Game, mut wait: impl FnMut(Duration)) -> AutoRunSummary {
        loop {
            match self.step(game) {
                AutoRunStep::Continue { after } => wait(after),
                AutoRunStep::Stopped(reason) => {
                    return AutoRunSummary { steps: self.steps, reason };
                }
            }
        }
    }

    fn stop(&mut self, reason: AutoRunStop) -> AutoRunStep {
        debug!(direction = ?self.direction, steps = self.steps, ?reason, "auto-run stopped");
        self.stopped = Some(reason);
        AutoRunStep::Stopped(reason)
    }
}

impl Game {
    /// Runs in `direction` without pausing between steps.
    pub fn auto_run(&mut self, direction: Direction) -> Result<AutoRunSummary, CommandError> {
        self.ensure_running()?;
        Ok(AutoRun::new(direction, Duration::ZERO).run(self, |_| {}))
    }
}
