use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use super::game::Game;
use crate::game::GameConfig;
use crate::input::TerminalInput;
use crate::persistence::ScoreStore;
use crate::render::TerminalRenderer;

/// Keyboard play in the terminal
pub struct HumanMode<S: ScoreStore> {
    game: Game<S>,
    screen_width: u16,
    screen_height: u16,
}

impl<S: ScoreStore> HumanMode<S> {
    /// `seed` fixes food placement; without it the RNG is seeded from entropy
    pub fn new(config: GameConfig, store: S, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (screen_width, screen_height) = (config.screen_width, config.screen_height);

        Ok(Self {
            game: Game::new(config, rng, store)?,
            screen_width,
            screen_height,
        })
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

        let mut renderer = TerminalRenderer::new(terminal, self.screen_width, self.screen_height);
        let mut input = TerminalInput::new();

        // Run game loop with cleanup
        let result = self.game.run(&mut input, &mut renderer).await;

        // Cleanup terminal
        cleanup_terminal(renderer.terminal_mut())?;

        result
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
