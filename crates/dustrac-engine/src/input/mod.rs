//! Keyboard input.
//!
//! Public API is platform-agnostic and does not expose winit types; the
//! runtime translates platform key events into `Key` transitions.

mod keys;

pub use keys::{Key, KeyboardState};
