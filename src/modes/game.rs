//! The game loop: Intro, Playing and GameOver screens, each run at a fixed
//! target frame duration.

use anyhow::Result;
use rand::{Rng, rngs::StdRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, RoundOutcome};
use crate::input::{Controller, InputSource, MenuCommand, PlayCommand};
use crate::metrics::SessionClock;
use crate::persistence::ScoreStore;
use crate::render::{PlayFrame, Renderer};

const INTRO_FONT_SIZE: u16 = 20;
const GAME_OVER_FONT_SIZE: u16 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Playing,
    GameOver,
}

/// Sleep off whatever is left of the frame budget. Frames that ran over
/// budget continue immediately.
pub async fn pace(frame_start: Instant, target: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < target {
        tokio::time::sleep(target - elapsed).await;
    }
}

/// Owns the engine and the score store and sequences
/// input, update and render every frame.
pub struct Game<S: ScoreStore, R: Rng = StdRng> {
    engine: GameEngine<R>,
    store: S,
    controller: Controller,
    clock: SessionClock,
    frame_duration: Duration,
}

impl<S: ScoreStore, R: Rng> Game<S, R> {
    /// Load the stored best score and set up the first round
    pub fn new(config: GameConfig, rng: R, store: S) -> Result<Self> {
        let stored = store.load()?;
        if let Some(best) = &stored {
            info!(score = best.score, holder = %best.name, "loaded high score");
        }
        let frame_duration = config.frame_duration();

        Ok(Self {
            engine: GameEngine::new(config, rng, stored),
            store,
            controller: Controller::new(),
            clock: SessionClock::new(Instant::now()),
            frame_duration,
        })
    }

    /// Run until the player quits
    pub async fn run<I, D>(&mut self, input: &mut I, renderer: &mut D) -> Result<()>
    where
        I: InputSource,
        D: Renderer,
    {
        let mut screen = Screen::Intro;

        loop {
            screen = match screen {
                Screen::Intro => {
                    let message = self.intro_message();
                    match self
                        .show_screen(&message, INTRO_FONT_SIZE, input, renderer)
                        .await?
                    {
                        MenuCommand::Confirm => {
                            self.clock.start_round(Instant::now());
                            Screen::Playing
                        }
                        _ => return Ok(()),
                    }
                }
                Screen::Playing => {
                    let outcome = self.play_round(input, renderer).await?;
                    self.end_round(outcome)?;
                    if outcome == RoundOutcome::Quit {
                        return Ok(());
                    }
                    Screen::GameOver
                }
                Screen::GameOver => {
                    let message = self.game_over_message();
                    match self
                        .show_screen(&message, GAME_OVER_FONT_SIZE, input, renderer)
                        .await?
                    {
                        MenuCommand::Confirm => {
                            self.restart()?;
                            Screen::Playing
                        }
                        _ => return Ok(()),
                    }
                }
            };
            debug!(?screen, "screen transition");
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Interstitial loop shared by the start and game-over screens
    async fn show_screen<I, D>(
        &mut self,
        message: &str,
        font_size: u16,
        input: &mut I,
        renderer: &mut D,
    ) -> Result<MenuCommand>
    where
        I: InputSource,
        D: Renderer,
    {
        loop {
            let frame_start = Instant::now();

            let snapshot = input.poll()?;
            let command = self.controller.handle_menu(&snapshot);
            renderer.render_message(message, font_size)?;

            if command != MenuCommand::Wait {
                return Ok(command);
            }

            pace(frame_start, self.frame_duration).await;
        }
    }

    /// Gameplay loop; returns why the round ended
    async fn play_round<I, D>(&mut self, input: &mut I, renderer: &mut D) -> Result<RoundOutcome>
    where
        I: InputSource,
        D: Renderer,
    {
        info!(player = %self.engine.score().player_name(), "round started");

        loop {
            let frame_start = Instant::now();

            // Input, Update, Render
            let snapshot = input.poll()?;
            if self
                .controller
                .handle_gameplay(&snapshot, &mut self.engine.steer())
                == PlayCommand::Quit
            {
                return Ok(RoundOutcome::Quit);
            }

            self.engine.update();
            let config = self.engine.config();
            let play = PlayFrame::capture(
                self.engine.snake(),
                self.engine.food(),
                config.grid_width,
                config.grid_height,
                self.engine.score().current(),
                self.clock.round_clock(Instant::now()),
            );
            renderer.render_play(&play)?;

            if let Some(outcome) = self.engine.outcome() {
                return Ok(outcome);
            }

            if let Some(frames) = self.clock.tick(Instant::now()) {
                debug!(fps = frames, "frame rate");
                renderer.update_window_title(self.engine.score().current(), frames)?;
            }

            pace(frame_start, self.frame_duration).await;
        }
    }

    /// Merge the round into the best score and write it back if it improved
    fn end_round(&mut self, outcome: RoundOutcome) -> Result<()> {
        let rounds = self.clock.finish_round();
        info!(
            ?outcome,
            score = self.engine.score().current(),
            size = self.engine.snake().size(),
            rounds,
            "round over"
        );

        if let Some(best) = self.engine.finish_round(outcome) {
            self.store.save(&best)?;
            info!(score = best.score, holder = %best.name, "new high score saved");
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        let stored = self.store.load()?;
        self.engine.reset(stored);
        self.clock.start_round(Instant::now());
        Ok(())
    }

    fn intro_message(&self) -> String {
        let score = self.engine.score();
        let best = score.best();
        format!(
            "Hello, {}! High score is {} by {}. Press Enter to start game, Esc to quit.",
            score.player_name(),
            best.score,
            best.name
        )
    }

    fn game_over_message(&self) -> String {
        let score = self.engine.score();
        let best = score.best();
        let prefix = if self.engine.outcome() == Some(RoundOutcome::BoardFull) {
            "Board cleared! "
        } else {
            ""
        };
        format!(
            "{}Your score is {}. High score is {} by {}. Press Enter to play again, Esc to quit.",
            prefix,
            score.current(),
            best.score,
            best.name
        )
    }
}
