//! Time subsystem.
//!
//! - `FrameClock`: one per window, call `tick()` once per presented frame.
//! - `StepTimer`: turns frame deltas into a whole number of fixed simulation
//!   steps at the game's target rate.

mod frame_clock;
mod step_timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use step_timer::StepTimer;
