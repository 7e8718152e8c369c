//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the game,
//! so game code never touches winit event plumbing directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx, WindowCtx};
