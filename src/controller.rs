//! Game session controller
//!
//! [`GameController`] is the single owner of the running session. Input,
//! ticks, and pause/resume/restart commands all go through its methods, so
//! nothing else holds a reference to the model while it changes.
//!
//! ```text
//!  Running --pause--> Paused --resume--> Running
//!  Running --collision--> GameOver --reset--> Running
//! ```
//!
//! Reset is accepted from every state. Pause and resume are ignored once the
//! game is over.

use log::info;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{
    CollisionType, Direction, GameConfig, GameStatus, GridModel, SimulationEngine, TickResult,
};
use crate::input::InputController;

/// Fixed-period tick source that can be stopped and restarted in place
pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Begin ticking; the first tick lands one full period from now
    ///
    /// Must be called from within a tokio runtime. Starting a running
    /// scheduler keeps its current cadence.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Resolve on the next tick, or never while stopped
    pub async fn wait(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Summary handed out when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    pub final_score: u32,
    pub length: usize,
    pub cause: CollisionType,
}

/// What a scheduled tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Skipped,
    Moved,
    Ate,
    GameOver(GameOverReport),
}

/// Owns the model, the engine, the pending input, and the tick scheduler
pub struct GameController<R: Rng = StdRng> {
    engine: SimulationEngine<R>,
    model: GridModel,
    input: InputController,
    scheduler: TickScheduler,
}

impl GameController<StdRng> {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_engine(config, SimulationEngine::new(config))
    }

    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_engine(config, SimulationEngine::seeded(config, seed))
    }
}

impl<R: Rng> GameController<R> {
    /// Build a controller around an engine; the scheduler stays stopped until [`start`](Self::start)
    pub fn with_engine(config: &GameConfig, mut engine: SimulationEngine<R>) -> Self {
        let model = engine.new_model();
        Self {
            engine,
            model,
            input: InputController::new(),
            scheduler: TickScheduler::new(config.tick_interval()),
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn status(&self) -> GameStatus {
        self.model.status
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.input.pending()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Start the tick scheduler if the session is running
    pub fn start(&mut self) {
        if self.model.status == GameStatus::Running {
            self.scheduler.start();
        }
    }

    /// Wait for the next scheduled tick; never resolves while paused or over
    pub async fn wait_for_tick(&mut self) {
        self.scheduler.wait().await;
    }

    /// Queue a direction change for the next tick
    ///
    /// Returns whether the direction was accepted. Reversals and input
    /// outside the running state are dropped.
    pub fn on_direction(&mut self, direction: Direction) -> bool {
        if self.model.status != GameStatus::Running {
            return false;
        }
        self.input.on_key(direction, self.model.snake.direction())
    }

    /// Advance the session by one tick
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.model.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        let pending = self.input.take_pending();
        match self.engine.tick(&mut self.model, pending) {
            TickResult::Continue => TickOutcome::Moved,
            TickResult::Ate => TickOutcome::Ate,
            TickResult::Collided(cause) => TickOutcome::GameOver(self.finish(cause)),
        }
    }

    /// Stop the session after a collision, keeping the final model for display
    fn finish(&mut self, cause: CollisionType) -> GameOverReport {
        self.scheduler.stop();
        self.input.clear();
        self.model.status = GameStatus::GameOver;

        let report = GameOverReport {
            final_score: self.model.score,
            length: self.model.snake.len(),
            cause,
        };
        info!(
            "Game over ({} collision): score {}, length {}, steps {}",
            cause, report.final_score, report.length, self.model.steps
        );
        report
    }

    /// Returns true if the game moved from running to paused
    pub fn pause(&mut self) -> bool {
        if self.model.status != GameStatus::Running {
            return false;
        }
        self.scheduler.stop();
        self.model.status = GameStatus::Paused;
        info!("Paused at score {}", self.model.score);
        true
    }

    /// Returns true if the game moved from paused to running
    pub fn resume(&mut self) -> bool {
        if self.model.status != GameStatus::Paused {
            return false;
        }
        self.model.status = GameStatus::Running;
        self.scheduler.start();
        info!("Resumed at score {}", self.model.score);
        true
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        match self.model.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::GameOver => false,
        }
    }

    /// Discard the session and start a new one
    pub fn reset(&mut self) {
        self.scheduler.stop();
        self.input.clear();
        self.model = self.engine.new_model();
        self.scheduler.start();
        info!("New game started");
    }
}
