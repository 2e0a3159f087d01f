use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::{InputSnapshot, InputSource};
use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Confirm,
    Quit,
    None,
}

impl KeyAction {
    /// Mark this action on a frame snapshot
    pub fn apply(&self, snapshot: &mut InputSnapshot) {
        match self {
            KeyAction::Steer(Direction::Up) => snapshot.up = true,
            KeyAction::Steer(Direction::Down) => snapshot.down = true,
            KeyAction::Steer(Direction::Left) => snapshot.left = true,
            KeyAction::Steer(Direction::Right) => snapshot.right = true,
            KeyAction::Confirm => snapshot.confirm = true,
            KeyAction::Quit => snapshot.quit = true,
            KeyAction::None => {}
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads pending crossterm events without blocking
pub struct TerminalInput {
    handler: InputHandler,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            handler: InputHandler::new(),
        }
    }

    fn record(&self, event: Event, snapshot: &mut InputSnapshot) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handler.handle_key_event(key).apply(snapshot);
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<InputSnapshot> {
        let mut snapshot = InputSnapshot::default();
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;
            self.record(event, &mut snapshot);
        }
        Ok(snapshot)
    }
}
