use glam::Vec2;

/// Horizontal direction the player is looking in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Sprites are authored facing right, so left means flipped.
    pub fn is_flipped(self) -> bool {
        self == Facing::Left
    }
}

/// Animation clips the core asks the renderer to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Idle,
    Walk,
    Jump,
    Land,
    Attack,
    MeleeAttack,
    Hit,
    Die,
}

/// A sound cue emitted by the player core.
/// The host maps each cue to an actual audio asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Attack,
    MeleeSwing,
    Hit,
    Death,
}

/// Playback options attached to a sound cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundOptions {
    /// Linear volume (1.0 = asset default).
    pub volume: f32,
    /// Pitch offset in cents.
    pub detune: f32,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            detune: 0.0,
        }
    }
}

impl SoundOptions {
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_detune(mut self, detune: f32) -> Self {
        self.detune = detune;
        self
    }
}

/// A camera shake request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraShake {
    pub duration_ms: f64,
    pub intensity: f32,
}

impl CameraShake {
    /// Light shake on taking a hit.
    pub const HIT: CameraShake = CameraShake {
        duration_ms: 100.0,
        intensity: 0.001,
    };
    /// Heavier shake when the player falls out of the world.
    pub const OUT_OF_BOUNDS: CameraShake = CameraShake {
        duration_ms: 250.0,
        intensity: 0.005,
    };
}

/// Request to create a projectile. Ownership of the spawned entity
/// belongs to whoever handles the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub origin: Vec2,
    pub power: u32,
    pub facing: Facing,
}

/// Delayed callbacks the player schedules with the timer collaborator.
/// The host hands them back through `Player::on_timer` once due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Ends the invincibility window opened by grant number `grant`.
    InvincibilityExpired { grant: u32 },
    /// The hit sound may play again.
    HitSoundReady,
}

/// A timer request: fire `event` after `delay_ms`, then `repeat` more times
/// at the same interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    pub delay_ms: f64,
    pub event: TimerEvent,
    pub repeat: u32,
}

impl Timer {
    /// A one-shot timer.
    pub fn once(delay_ms: f64, event: TimerEvent) -> Self {
        Self {
            delay_ms,
            event,
            repeat: 0,
        }
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_sign_and_flip() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
        assert!(Facing::Left.is_flipped());
        assert!(!Facing::default().is_flipped());
    }

    #[test]
    fn timer_builder() {
        let t = Timer::once(150.0, TimerEvent::HitSoundReady).with_repeat(2);
        assert_eq!(t.delay_ms, 150.0);
        assert_eq!(t.repeat, 2);
    }
}
