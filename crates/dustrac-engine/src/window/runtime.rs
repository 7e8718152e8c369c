use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{Key, KeyboardState};
use crate::time::FrameClock;

/// How the game window occupies the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowMode {
    Windowed,
    /// Borderless fullscreen on the primary monitor.
    Fullscreen,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Inner size in physical pixels; ignored in fullscreen.
    pub size: PhysicalSize<u32>,
    pub mode: WindowMode,
    pub cursor_visible: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Dust Racing 2D".to_string(),
            size: PhysicalSize::new(1024, 768),
            mode: WindowMode::Windowed,
            cursor_visible: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop on the current thread until the app exits, then
    /// hands the app back so the caller can inspect its final state.
    ///
    /// Errors raised while creating the window or its GPU surface stop the loop
    /// and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<A>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(state.app),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    keyboard: KeyboardState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    started: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            started: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes().with_title(self.config.title.clone());

        attrs = match self.config.mode {
            WindowMode::Windowed => attrs.with_inner_size(self.config.size),
            WindowMode::Fullscreen => {
                attrs.with_fullscreen(Some(Fullscreen::Borderless(event_loop.primary_monitor())))
            }
        };

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        window.set_cursor_visible(self.config.cursor_visible);
        window.focus_window();

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            keyboard: KeyboardState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.started {
            self.started = true;

            let monitor_size = event_loop.primary_monitor().map(|m| m.size());
            let mut ctx = StartCtx {
                monitor_size,
                config: &mut self.config,
            };
            if self.app.on_start(&mut ctx) == AppControl::Exit {
                event_loop.exit();
                return;
            }
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err.context("failed to create the game window")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);

        // Continuous redraw: the simulation is driven from the frame callback.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid capturing `self` inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                entry.with_keyboard_mut(|kb| kb.focus_lost());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                entry.with_keyboard_mut(|kb| match event.state {
                    ElementState::Pressed => kb.press(key),
                    ElementState::Released => kb.release(key),
                });
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => {
                let mut control = AppControl::Continue;

                entry.with_mut(|fields| {
                    let time = fields.clock.tick();

                    {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            keyboard: fields.keyboard,
                            time,
                        };
                        control = app.on_frame(&mut ctx);
                    }

                    fields.keyboard.end_frame();
                });

                if control == AppControl::Exit {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::ArrowUp) => Key::ArrowUp,
        PhysicalKey::Code(KeyCode::ArrowDown) => Key::ArrowDown,
        PhysicalKey::Code(KeyCode::ArrowLeft) => Key::ArrowLeft,
        PhysicalKey::Code(KeyCode::ArrowRight) => Key::ArrowRight,
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::Enter) => Key::Enter,
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyP) => Key::P,
        _ => Key::Unknown,
    }
}
