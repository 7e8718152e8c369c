use winit::event::WindowEvent;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
pub trait App {
    /// Called once, after the event loop is live and before the window exists.
    ///
    /// The app may adjust the window configuration from the monitor size.
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called for raw window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
