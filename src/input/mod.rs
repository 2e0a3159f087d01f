//! Keyboard input: raw key state per frame and its translation into game
//! intents.

pub mod controller;
pub mod handler;

pub use controller::{Controller, MenuCommand, PlayCommand};
pub use handler::{InputHandler, KeyAction, TerminalInput};

use anyhow::Result;

/// Which keys were asserted during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub quit: bool,
}

/// Source of per-frame input snapshots
///
/// Implementations must not block; they report whatever arrived since the
/// previous call.
pub trait InputSource {
    fn poll(&mut self) -> Result<InputSnapshot>;
}
