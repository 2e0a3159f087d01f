use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Construction-time configuration for a game session
///
/// Every field is fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Width of the drawing surface (terminal columns)
    pub screen_width: u16,
    /// Height of the drawing surface (terminal rows)
    pub screen_height: u16,
    /// Name shown on the intro screen and stored with a new high score
    pub player_name: String,
    /// Target duration of one frame in milliseconds
    pub target_frame_ms: u64,

    /// Length of a freshly spawned snake
    pub initial_snake_length: usize,
    /// Cells travelled per frame at the start of a round
    pub initial_speed: f32,
    /// Speed added for every food item eaten
    pub speed_increment: f32,
    /// Upper bound on speed; at most one cell transition per frame
    pub max_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 32,
            screen_width: 66,
            screen_height: 36,
            player_name: "player".to_string(),
            target_frame_ms: 1000 / 60,
            initial_snake_length: 1,
            initial_speed: 0.1,
            speed_increment: 0.02,
            max_speed: 1.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Target frame duration as a `Duration`
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.target_frame_ms)
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Smallest surface, in terminal columns and rows, that shows the whole
    /// grid: two columns per cell plus the border, and one row per cell plus
    /// the border, header and footer lines.
    pub fn required_screen(&self) -> (usize, usize) {
        (self.grid_width * 2 + 2, self.grid_height + 4)
    }

    /// Check that all parameters are usable
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            bail!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            bail!("grid dimensions exceed i32 range");
        }
        let (min_width, min_height) = self.required_screen();
        if (self.screen_width as usize) < min_width || (self.screen_height as usize) < min_height {
            bail!(
                "a {}x{} grid needs a screen of at least {}x{}, got {}x{}",
                self.grid_width,
                self.grid_height,
                min_width,
                min_height,
                self.screen_width,
                self.screen_height
            );
        }
        // The snake spawns facing up with its body trailing down one column
        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_height {
            bail!(
                "initial_snake_length must be in 1..={}, got {}",
                self.grid_height,
                self.initial_snake_length
            );
        }
        if !(self.max_speed > 0.0 && self.max_speed <= 1.0) {
            bail!("max_speed must be in (0, 1], got {}", self.max_speed);
        }
        if !(self.initial_speed > 0.0 && self.initial_speed <= self.max_speed) {
            bail!(
                "initial_speed must be in (0, {}], got {}",
                self.max_speed,
                self.initial_speed
            );
        }
        if self.speed_increment < 0.0 {
            bail!(
                "speed_increment must not be negative, got {}",
                self.speed_increment
            );
        }
        if self.player_name.trim().is_empty() {
            bail!("player name must not be empty");
        }
        Ok(())
    }
}
