use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::interval;

use crate::controller::{GameController, TickOutcome};
use crate::game::{GameConfig, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{FoodSprite, Renderer, spawn_sprite_load};

type SpriteReceiver = oneshot::Receiver<Result<String>>;

/// Interactive terminal session
///
/// One task owns everything here. Key events, ticks, and redraws are
/// handled one at a time, so a tick never interleaves with input.
pub struct App {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sprite: FoodSprite,
    sprite_path: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &GameConfig, seed: Option<u64>) -> Self {
        let controller = match seed {
            Some(seed) => GameController::seeded(config, seed),
            None => GameController::new(config),
        };
        let sprite = match config.food_sprite {
            Some(_) => FoodSprite::Loading,
            None => FoodSprite::Unavailable,
        };

        Self {
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(config.cell_width),
            input_handler: InputHandler::new(),
            sprite,
            sprite_path: config.food_sprite.clone(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut sprite_rx = self.sprite_path.clone().map(spawn_sprite_load);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.controller.start();
        self.metrics.on_game_start();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; pending forever while paused or over
                _ = self.controller.wait_for_tick() => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                loaded = next_sprite(&mut sprite_rx), if sprite_rx.is_some() => {
                    sprite_rx = None;
                    self.on_sprite_loaded(loaded);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            "Quitting after {} game(s), best score {}",
            self.metrics.games_played, self.metrics.best_score
        );
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer.render(
                    frame,
                    self.controller.model(),
                    &self.metrics,
                    &self.sprite,
                );
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.controller.on_direction(direction);
                }
                KeyAction::TogglePause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver(report) = self.controller.on_tick() {
            self.metrics.on_game_over(report.final_score);
        }
    }

    fn toggle_pause(&mut self) {
        match self.controller.status() {
            GameStatus::Running => {
                if self.controller.pause() {
                    self.metrics.on_pause();
                }
            }
            GameStatus::Paused => {
                if self.controller.resume() {
                    self.metrics.on_resume();
                }
            }
            GameStatus::GameOver => {}
        }
    }

    fn reset_game(&mut self) {
        self.controller.reset();
        self.metrics.on_game_start();
    }

    fn on_sprite_loaded(&mut self, loaded: Result<String>) {
        self.sprite = match loaded {
            Ok(glyph) => {
                info!("Food sprite loaded: {}", glyph);
                FoodSprite::Loaded(glyph)
            }
            Err(err) => {
                warn!("Using fallback food: {:#}", err);
                FoodSprite::Unavailable
            }
        };
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Resolve with the sprite load result; never resolves once the receiver is consumed
async fn next_sprite(rx: &mut Option<SpriteReceiver>) -> Result<String> {
    match rx.as_mut() {
        Some(rx) => rx.await.context("Food sprite loader stopped")?,
        None => std::future::pending().await,
    }
}
