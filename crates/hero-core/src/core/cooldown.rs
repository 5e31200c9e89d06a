/// Rate limiter for an action, based on time since its last use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    delay_ms: f64,
    last_ms: f64,
}

impl Cooldown {
    /// The action counts as last used at t = 0, so it becomes available
    /// once `delay_ms` has passed since the start of the session.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            last_ms: 0.0,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Time of the last successful use.
    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }

    /// Strictly more than `delay_ms` must have passed.
    pub fn is_ready(&self, now: f64) -> bool {
        now - self.last_ms > self.delay_ms
    }

    /// Consume the cooldown if ready. Returns whether it fired.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.is_ready(now) {
            self.last_ms = now;
            true
        } else {
            false
        }
    }
}
