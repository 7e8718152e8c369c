/// Fixed-rate simulation stepper.
///
/// Accumulates frame deltas and reports how many whole steps of
/// `1 / rate` seconds are due. At most `max_steps_per_frame` steps are
/// returned per call; any backlog beyond that is dropped so a slow frame
/// cannot trigger a spiral of catch-up work.
#[derive(Debug, Clone)]
pub struct StepTimer {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl StepTimer {
    /// Creates a timer running at `rate` steps per second. `rate` must be > 0.
    pub fn new(rate: u32) -> Self {
        debug_assert!(rate > 0);
        Self {
            step: 1.0 / rate.max(1) as f32,
            accumulator: 0.0,
            max_steps_per_frame: 5,
        }
    }

    /// Length of one step in seconds.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `dt` seconds and returns the number of steps to run now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps_per_frame && self.accumulator >= self.step {
            log::debug!("step timer dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.step;
        }

        steps
    }
}
