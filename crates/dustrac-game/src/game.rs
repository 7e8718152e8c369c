use std::f32::consts::PI;

use thiserror::Error;

use dustrac_engine::coords::{Rect, Vec2};
use dustrac_engine::core::{App, AppControl, FrameCtx};
use dustrac_engine::input::{Key, KeyboardState};
use dustrac_engine::time::StepTimer;

use crate::car::{Car, CarId, Controls, Driver};
use crate::collision;
use crate::pit::Pit;
use crate::race::Race;
use crate::renderer::Renderer;
use crate::scene::SceneSize;

pub const PLAYER_CAR: CarId = CarId(0);

const COMPUTER_CARS: u32 = 3;
const PIT_SIZE: Vec2 = Vec2::new(200.0, 60.0);
const MIN_SCENE: SceneSize = SceneSize::new(320, 240);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameInitError {
    #[error("no renderer set")]
    MissingRenderer,

    #[error("invalid frame rate {0}")]
    InvalidFps(u32),

    #[error("scene {width}x{height} is too small for the track")]
    SceneTooSmall { width: u32, height: u32 },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameState {
    Created,
    Ready,
    Running,
    Paused,
}

/// The game object: owns the cars, the pit and the race, and steps them at
/// the configured rate.
pub struct Game {
    state: GameState,
    renderer: Option<Renderer>,
    fps: u32,
    timer: StepTimer,
    scene: SceneSize,
    cars: Vec<Car>,
    pit: Pit,
    race: Race,
    steps: u64,
}

impl Game {
    pub fn new() -> Self {
        Self {
            state: GameState::Created,
            renderer: None,
            fps: 60,
            timer: StepTimer::new(60),
            scene: SceneSize::default(),
            cars: Vec::new(),
            pit: Pit::new(Rect::default()),
            race: Race::new(),
            steps: 0,
        }
    }

    pub fn set_renderer(&mut self, renderer: Renderer) {
        self.scene = renderer.scene();
        self.renderer = Some(renderer);
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    /// Validates the configuration and lays out the track.
    pub fn init(&mut self) -> Result<(), GameInitError> {
        let Some(renderer) = &self.renderer else {
            return Err(GameInitError::MissingRenderer);
        };
        let resolution = renderer.resolution();
        let fullscreen = renderer.is_fullscreen();

        if self.fps == 0 {
            return Err(GameInitError::InvalidFps(self.fps));
        }
        if self.scene.width < MIN_SCENE.width || self.scene.height < MIN_SCENE.height {
            return Err(GameInitError::SceneTooSmall {
                width: self.scene.width,
                height: self.scene.height,
            });
        }

        self.timer = StepTimer::new(self.fps);

        let (w, h) = (self.scene.width as f32, self.scene.height as f32);
        let pit_center = Vec2::new(w * 0.5, h - PIT_SIZE.y);
        self.pit = Pit::new(Rect::centered(pit_center, PIT_SIZE));

        self.cars.clear();
        self.cars.push(Car::new(
            PLAYER_CAR,
            Driver::Human,
            Vec2::new(w * 0.5, h - 3.0 * PIT_SIZE.y),
            0.0,
        ));
        for i in 0..COMPUTER_CARS {
            let lane = (i + 1) as f32 / (COMPUTER_CARS + 1) as f32;
            self.cars.push(Car::new(
                CarId(i + 1),
                Driver::Computer,
                Vec2::new(w * lane, h * 0.3),
                PI * lane,
            ));
        }

        log::info!(
            "game initialized: {}x{} {}, scene {}x{}, {} cars, {} steps/s",
            resolution.width,
            resolution.height,
            if fullscreen { "fullscreen" } else { "windowed" },
            self.scene.width,
            self.scene.height,
            self.cars.len(),
            self.fps
        );

        self.state = GameState::Ready;
        Ok(())
    }

    pub fn start(&mut self) {
        if self.state != GameState::Ready {
            log::warn!("start requested in state {:?}", self.state);
            return;
        }
        log::info!("race started");
        self.state = GameState::Running;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn car_mut(&mut self, id: CarId) -> Option<&mut Car> {
        self.cars.iter_mut().find(|c| c.id() == id)
    }

    pub fn pit(&self) -> &Pit {
        &self.pit
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Feeds `dt` seconds of frame time and runs the steps that became due.
    /// Returns the number of steps run.
    pub fn advance(&mut self, dt: f32, keyboard: &KeyboardState) -> u32 {
        if keyboard.was_pressed(Key::P) {
            self.toggle_pause();
        }
        if self.state != GameState::Running {
            return 0;
        }

        let controls = player_controls(keyboard);
        let steps = self.timer.advance(dt);
        for _ in 0..steps {
            self.step(controls);
        }
        steps
    }

    /// One simulation step: move, collide, notify, age.
    pub fn step(&mut self, controls: Controls) {
        let dt = self.timer.step();
        for car in &mut self.cars {
            car.step(dt, controls);
        }

        collision::dispatch(self.scene.bounds(), &mut self.cars, &mut self.pit);

        for stop in self.pit.drain_pit_stops() {
            self.race.on_pit_stop(stop, &mut self.cars);
        }

        self.pit.step_time();
        self.steps += 1;
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            other => other,
        };
        log::debug!("game state: {:?}", self.state);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Game {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.keyboard.was_pressed(Key::Escape) {
            log::info!("exit requested after {} steps", self.steps);
            return AppControl::Exit;
        }

        self.advance(ctx.time.dt, ctx.keyboard);

        let Some(renderer) = &self.renderer else {
            return AppControl::Exit;
        };
        let clear = renderer.clear_color(self.pit.pitting_count() > 0);
        ctx.present(clear)
    }
}

fn player_controls(keyboard: &KeyboardState) -> Controls {
    Controls {
        accelerate: keyboard.is_down(Key::ArrowUp),
        brake: keyboard.is_down(Key::ArrowDown),
        left: keyboard.is_down(Key::ArrowLeft),
        right: keyboard.is_down(Key::ArrowRight),
    }
}
