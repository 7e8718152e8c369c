//! Dust Racing engine crate.
//!
//! This crate owns the platform + GPU runtime pieces the game is built on.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod dialog;
