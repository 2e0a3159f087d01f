pub mod frame_rate;
pub mod session_clock;

pub use frame_rate::FrameCounter;
pub use session_clock::SessionClock;
