/// Fixed timestep accumulator with a monotonic tick clock.
///
/// Variable frame deltas (seconds) go in; a whole number of fixed ticks
/// comes out. Each tick advances the clock by `dt`, and the clock is what
/// the player core sees as "current time", in milliseconds.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick.
    dt: f32,
    /// Frame time not yet turned into ticks.
    accumulator: f32,
    /// Upper bound on ticks per frame.
    max_steps: u32,
    /// Milliseconds elapsed over all ticks so far.
    now_ms: f64,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
            now_ms: 0.0,
        }
    }

    /// Start the clock at `now_ms` instead of zero.
    pub fn starting_at(mut self, now_ms: f64) -> Self {
        self.now_ms = now_ms;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time. Returns how many ticks to run this frame.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // A long stall drops time rather than replaying it all.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Advance the clock by one tick and return the new time.
    pub fn advance(&mut self) -> f64 {
        self.now_ms += self.dt_ms();
        self.now_ms
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn dt_ms(&self) -> f64 {
        self.dt as f64 * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut ts = FixedTimestep::new(1.0 / 60.0).with_max_steps(4);
        assert_eq!(ts.accumulate(1.0), 4);
    }

    #[test]
    fn clock_advances_per_tick() {
        let mut ts = FixedTimestep::new(0.02).starting_at(1000.0);
        let t1 = ts.advance();
        let t2 = ts.advance();
        assert!((t1 - 1020.0).abs() < 1e-3);
        assert!((t2 - 1040.0).abs() < 1e-3);
        assert_eq!(ts.now_ms(), t2);
    }

    #[test]
    fn negative_frame_time_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-5.0), 0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }
}
