//! Dust Racing gameplay crate.
//!
//! Holds the game object with its cars, pit and race bookkeeping, plus the
//! bootstrap that brings the engine up and hands control to the event loop.

pub mod bootstrap;
pub mod car;
pub mod collision;
pub mod display;
pub mod game;
pub mod pit;
pub mod race;
pub mod renderer;
pub mod scene;
pub mod settings;
