/// Post-hit damage immunity window.
///
/// Each grant gets a generation number. The expiry timer carries that
/// number back, so an expiry left over from an earlier grant cannot cut a
/// later window short.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Invincibility {
    active: bool,
    grant: u32,
    expires_at: Option<f64>,
}

impl Invincibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// When the current window is expected to close.
    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at.filter(|_| self.active)
    }

    /// Open a new window starting at `now`. Returns its generation.
    pub fn grant(&mut self, now: f64, duration_ms: f64) -> u32 {
        self.grant = self.grant.wrapping_add(1);
        self.active = true;
        self.expires_at = Some(now + duration_ms);
        self.grant
    }

    /// Close the window opened by `grant`. Returns true if it was open.
    pub fn expire(&mut self, grant: u32) -> bool {
        if !self.active || grant != self.grant {
            return false;
        }
        self.active = false;
        self.expires_at = None;
        true
    }
}
