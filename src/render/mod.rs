pub mod renderer;

pub use renderer::TerminalRenderer;

use anyhow::Result;
use std::collections::VecDeque;

use crate::game::{Position, Snake};

/// Read-only view of one gameplay frame handed to a [`Renderer`]
#[derive(Debug, Clone)]
pub struct PlayFrame<'a> {
    /// Occupied cells, head first
    pub cells: &'a VecDeque<Position>,
    /// Continuous head coordinates in cell units
    pub head_position: (f32, f32),
    pub alive: bool,
    /// `None` once the board is full
    pub food: Option<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    /// Elapsed round time, formatted
    pub round_clock: String,
}

impl<'a> PlayFrame<'a> {
    pub fn capture(
        snake: &'a Snake,
        food: Option<Position>,
        grid_width: usize,
        grid_height: usize,
        score: u32,
        round_clock: String,
    ) -> Self {
        Self {
            cells: snake.cells(),
            head_position: snake.head_position(),
            alive: snake.is_alive(),
            food,
            grid_width,
            grid_height,
            score,
            round_clock,
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.cells.front().copied()
    }

    /// Cell the head has travelled more than half way into, when that is
    /// not the discrete head cell
    pub fn leading_cell(&self) -> Option<Position> {
        let head = self.head()?;
        let (x, y) = self.head_position;
        let cell = Position::new(
            (x.round() as i32).rem_euclid(self.grid_width as i32),
            (y.round() as i32).rem_euclid(self.grid_height as i32),
        );
        (cell != head).then_some(cell)
    }
}


/// Drawing surface the game loop renders onto
pub trait Renderer {
    /// Draw one frame of gameplay
    fn render_play(&mut self, frame: &PlayFrame<'_>) -> Result<()>;

    /// Draw a single line of interstitial text
    fn render_message(&mut self, message: &str, font_size: u16) -> Result<()>;

    /// Report score and the last frames-per-second count
    fn update_window_title(&mut self, score: u32, fps: u32) -> Result<()>;
}
