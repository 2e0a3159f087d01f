//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Food placement takes its random source as a parameter, so every rule here
//! can be driven deterministically from tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod score;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, RoundOutcome, StepInfo};
pub use food::{BoardFull, place_food};
pub use score::{HighScore, ScoreRecord};
pub use state::{HeadingControl, Position, Snake};
