//! Application startup.
//!
//! Each phase returns a `Result`; the first failure stops the sequence and is
//! reported once by [`report`], which also picks the process exit code.
//!
//! Phases, in order:
//! 1. logging (`<temp>/dustrac.log`, echoed to the console)
//! 2. graphics capability check, with a blocking dialog on failure
//! 3. settings, from the [`SettingsSource`] handed to [`Bootstrap::new`]
//! 4. event loop start; once the desktop size is known the [`Launcher`]
//!    resolves the display, builds the renderer and the game object, and
//!    initializes and starts the game.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use dustrac_engine::core::{App, AppControl, FrameCtx, StartCtx};
use dustrac_engine::device::{probe_graphics, GpuInit, GraphicsVersion};
use dustrac_engine::logging::{init_logging as init_engine_logging, LoggingConfig};
use dustrac_engine::window::{Runtime, RuntimeConfig, WindowMode};
use dustrac_engine::dialog;

use crate::display::{DisplayPlan, Resolution};
use crate::game::{Game, GameInitError};
use crate::renderer::Renderer;
use crate::scene::SceneSize;
use crate::settings::{Settings, SettingsError};

pub const INIT_ERROR: &str = "Initing the game failed!";

const LOG_FILE: &str = "dustrac.log";
const WINDOW_TITLE: &str = "Dust Racing 2D";
const DIALOG_TITLE: &str = "Cannot start Dust Racing 2D";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to initialize logging: {0:#}")]
    Logging(anyhow::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to query the graphics capability: {0:#}")]
    GraphicsProbe(anyhow::Error),

    #[error("At least OpenGL {required} is required! (found {found})")]
    UnsupportedGraphics {
        found: GraphicsVersion,
        required: GraphicsVersion,
    },

    #[error("game initialization failed: {0}")]
    GameInit(#[from] GameInitError),

    #[error("engine error: {0:#}")]
    Engine(anyhow::Error),
}

/// `<temp dir>/dustrac.log`.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

/// Installs the process-wide logger: file + console echo, timestamped.
pub fn init_logging() -> Result<(), BootstrapError> {
    init_engine_logging(LoggingConfig::with_file(log_path())).map_err(BootstrapError::Logging)
}

/// Process exit status for a bootstrap outcome.
pub fn exit_status(result: &Result<(), BootstrapError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Logs the outcome once and converts it into the process exit code.
pub fn report(result: Result<(), BootstrapError>) -> ExitCode {
    if let Err(err) = &result {
        if matches!(err, BootstrapError::Logging(_)) {
            eprintln!("{err}");
            eprintln!("{INIT_ERROR}");
        } else {
            log::error!("{err}");
            log::error!("{INIT_ERROR}");
        }
    }
    ExitCode::from(exit_status(&result))
}

/// Platform services the bootstrap depends on.
pub trait Platform {
    /// Graphics version of the best available adapter.
    fn graphics_version(&mut self) -> anyhow::Result<GraphicsVersion>;

    /// Blocking, user-facing error message.
    fn show_error(&mut self, title: &str, message: &str);

    /// Runs the main event loop with `launcher` as the application and hands
    /// it back once the loop ends.
    fn run_event_loop(
        &mut self,
        config: RuntimeConfig,
        launcher: Launcher,
    ) -> anyhow::Result<Launcher>;
}

/// The real platform: wgpu probe, native dialogs, winit event loop.
pub struct NativePlatform;

impl Platform for NativePlatform {
    fn graphics_version(&mut self) -> anyhow::Result<GraphicsVersion> {
        let probe = pollster::block_on(probe_graphics())?;
        log::info!(
            "graphics adapter: {} ({:?})",
            probe.adapter_name,
            probe.backend
        );
        Ok(probe.version)
    }

    fn show_error(&mut self, title: &str, message: &str) {
        dialog::show_error(title, message);
    }

    fn run_event_loop(
        &mut self,
        config: RuntimeConfig,
        launcher: Launcher,
    ) -> anyhow::Result<Launcher> {
        Runtime::run(config, GpuInit::default(), launcher)
    }
}

/// Where the bootstrap takes its settings from.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// TOML file; a missing file means defaults.
    File(PathBuf),
    Value(Settings),
}

impl SettingsSource {
    fn load(&self) -> Result<Settings, SettingsError> {
        match self {
            SettingsSource::File(path) => Settings::load(path),
            SettingsSource::Value(settings) => Ok(settings.clone()),
        }
    }
}

impl From<Settings> for SettingsSource {
    fn from(settings: Settings) -> Self {
        SettingsSource::Value(settings)
    }
}

impl From<&Path> for SettingsSource {
    fn from(path: &Path) -> Self {
        SettingsSource::File(path.to_path_buf())
    }
}

pub struct Bootstrap<P: Platform> {
    settings: SettingsSource,
    platform: P,
}

impl<P: Platform> Bootstrap<P> {
    pub fn new(settings: impl Into<SettingsSource>, platform: P) -> Self {
        Self {
            settings: settings.into(),
            platform,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Runs the startup sequence and the game. Returns when the game exits.
    pub fn run(&mut self) -> Result<(), BootstrapError> {
        self.check_graphics()?;
        let settings = self.settings.load()?;

        let config = RuntimeConfig {
            title: WINDOW_TITLE.to_string(),
            cursor_visible: false,
            ..RuntimeConfig::default()
        };

        let launcher = self
            .platform
            .run_event_loop(config, Launcher::new(settings))
            .map_err(BootstrapError::Engine)?;

        launcher.finish()
    }

    fn check_graphics(&mut self) -> Result<GraphicsVersion, BootstrapError> {
        let required = GraphicsVersion::OPENGL_3_0;
        let message = format!("At least OpenGL {required} is required!");

        let found = match self.platform.graphics_version() {
            Ok(found) => found,
            Err(err) => {
                self.platform.show_error(DIALOG_TITLE, &message);
                return Err(BootstrapError::GraphicsProbe(err));
            }
        };

        if !found.meets(required) {
            self.platform.show_error(DIALOG_TITLE, &message);
            return Err(BootstrapError::UnsupportedGraphics { found, required });
        }

        log::info!("graphics version {found}");
        Ok(found)
    }
}

/// Application driven by the event loop: builds the game on start, then
/// forwards frames to it.
pub struct Launcher {
    settings: Settings,
    game: Option<Game>,
    failure: Option<BootstrapError>,
}

impl Launcher {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            game: None,
            failure: None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Resolves the display, configures the window and creates the game.
    pub fn launch(
        &mut self,
        desktop: Option<Resolution>,
        config: &mut RuntimeConfig,
    ) -> Result<(), BootstrapError> {
        let plan = DisplayPlan::resolve(&self.settings, desktop, SceneSize::DEFAULT_WIDTH);

        log::info!(
            "Resolution: {} {} {}",
            plan.resolution.width,
            plan.resolution.height,
            self.settings.full_resolution
        );

        config.size = PhysicalSize::new(plan.resolution.width, plan.resolution.height);
        config.mode = if plan.fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Windowed
        };
        config.cursor_visible = false;

        log::info!("Creating the renderer..");
        let renderer = Renderer::new(&plan);
        log::info!("Scene size: {} {}", plan.scene.width, plan.scene.height);

        log::info!("Creating game object..");
        let mut game = Game::new();
        game.set_renderer(renderer);
        game.set_fps(self.settings.fps);

        game.init()?;
        game.start();

        self.game = Some(game);
        Ok(())
    }

    /// Outcome of the launch, once the event loop has ended.
    pub fn finish(self) -> Result<(), BootstrapError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl App for Launcher {
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> AppControl {
        let desktop = ctx
            .monitor_size
            .map(|size| Resolution::new(size.width, size.height));

        match self.launch(desktop, ctx.config) {
            Ok(()) => AppControl::Continue,
            Err(err) => {
                self.failure = Some(err);
                AppControl::Exit
            }
        }
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match &mut self.game {
            Some(game) => game.on_window_event(event),
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match &mut self.game {
            Some(game) => game.on_frame(ctx),
            None => AppControl::Exit,
        }
    }
}
