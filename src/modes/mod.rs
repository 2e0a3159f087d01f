pub mod game;
pub mod human;

pub use game::{Game, Screen, pace};
pub use human::HumanMode;
