//! Snake Loop - terminal Snake built around a fixed-rate game loop
//!
//! This library provides:
//! - Core game logic: snake kinematics, food placement, scoring (game module)
//! - Input translation from key state to headings (input module)
//! - TUI rendering (render module)
//! - High-score storage (persistence module)
//! - The Intro / Playing / GameOver loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
