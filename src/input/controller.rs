use super::InputSnapshot;
use crate::game::{Direction, HeadingControl};

/// Result of translating one gameplay frame of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    Continue,
    Quit,
}

/// Result of translating one frame of input on an interstitial screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Wait,
    Confirm,
    Quit,
}

/// Pure translation of input snapshots into game intents
#[derive(Debug, Clone, Copy, Default)]
pub struct Controller;

impl Controller {
    pub fn new() -> Self {
        Self
    }

    /// Apply directional keys to the snake's heading and report quit.
    ///
    /// Directions asserted in the same frame are tried in the order
    /// up, down, left, right; each is checked against the heading as it
    /// stands, so a reversal is never committed.
    pub fn handle_gameplay(
        &self,
        input: &InputSnapshot,
        steer: &mut HeadingControl<'_>,
    ) -> PlayCommand {
        if input.quit {
            return PlayCommand::Quit;
        }

        let requested = [
            (input.up, Direction::Up),
            (input.down, Direction::Down),
            (input.left, Direction::Left),
            (input.right, Direction::Right),
        ];
        for (asserted, direction) in requested {
            if asserted {
                steer.request(direction);
            }
        }

        PlayCommand::Continue
    }

    /// Map confirm and quit on the start and game-over screens.
    /// Quit wins when both are asserted.
    pub fn handle_menu(&self, input: &InputSnapshot) -> MenuCommand {
        if input.quit {
            MenuCommand::Quit
        } else if input.confirm {
            MenuCommand::Confirm
        } else {
            MenuCommand::Wait
        }
    }
}
