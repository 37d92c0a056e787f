/// Fixed-step frame clock.
/// Turns variable animation-frame deltas into whole 60 Hz steps so the
/// per-step smoothing and twinkle constants look the same on any display.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// The fixed delta time per step.
    dt: f32,
    /// Leftover time not yet consumed by a step.
    accumulator: f32,
    /// Maximum steps returned for one frame.
    max_steps: u32,
    started: bool,
}

impl FrameClock {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt: dt.max(1e-4),
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            started: false,
        }
    }

    /// Add frame time and return the number of fixed steps to run.
    /// The first frame always runs exactly one step, whatever its delta.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        if !self.started {
            self.started = true;
            return 1;
        }
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap so a backgrounded tab doesn't fast-forward the sky
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        // Small slack absorbs f32 drift when deltas equal the step length
        let steps = ((self.accumulator + self.dt * 1e-3) / self.dt) as u32;
        let steps = steps.min(self.max_steps);
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
