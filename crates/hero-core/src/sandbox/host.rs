use glam::Vec2;

use crate::api::host::{PlayerHost, WorldBounds};
use crate::api::types::{
    AnimationKey, CameraShake, ProjectileSpawn, SoundCue, SoundOptions, Timer, TimerEvent,
};
use crate::components::animation::AnimationPlayer;
use crate::core::timer::TimerQueue;

/// In-memory implementation of every player collaborator.
///
/// Requests pile up in the public outboxes (`sounds`, `projectiles`, ...)
/// until [`SandboxHost::clear_frame_data`]. Movement is a bare kinematic
/// integrator with optional gravity and a flat floor; there is no collision.
#[derive(Debug)]
pub struct SandboxHost {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub bounds: WorldBounds,
    /// Downward acceleration used by `integrate`, in units/s².
    pub gravity: f32,
    /// Floor height. `None` leaves `on_ground` entirely to the caller.
    pub floor_y: Option<f32>,
    pub animation: AnimationPlayer,
    pub flipped: bool,
    pub timers: TimerQueue,
    now: f64,

    // -- Outboxes --
    pub sounds: Vec<(SoundCue, SoundOptions)>,
    pub shakes: Vec<CameraShake>,
    pub flickers: Vec<(f64, u32)>,
    pub projectiles: Vec<ProjectileSpawn>,
    pub played: Vec<AnimationKey>,
}

impl SandboxHost {
    pub fn new() -> Self {
        Self {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            on_ground: true,
            bounds: WorldBounds::default(),
            gravity: 0.0,
            floor_y: None,
            animation: AnimationPlayer::default(),
            flipped: false,
            timers: TimerQueue::new(),
            now: 0.0,
            sounds: Vec::new(),
            shakes: Vec::new(),
            flickers: Vec::new(),
            projectiles: Vec::new(),
            played: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_bounds(mut self, bounds: WorldBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Put a floor at `floor_y` and pull the body towards it.
    pub fn with_floor(mut self, floor_y: f32, gravity: f32) -> Self {
        self.floor_y = Some(floor_y);
        self.gravity = gravity;
        self.position.y = floor_y;
        self.on_ground = true;
        self
    }

    /// Current host time, as last passed to `fire_due`.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock to `now` and return the timer events that came due.
    pub fn fire_due(&mut self, now: f64) -> Vec<TimerEvent> {
        self.now = now;
        self.timers.advance(now)
    }

    pub fn tick_animation(&mut self, dt: f32) {
        self.animation.tick(dt);
    }

    /// Semi-implicit Euler step. Snaps to the floor, if there is one.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity.y += self.gravity * dt;
        self.position += self.velocity * dt;
        if let Some(floor) = self.floor_y {
            if self.position.y >= floor {
                self.position.y = floor;
                self.velocity.y = self.velocity.y.min(0.0);
                self.on_ground = true;
            } else {
                self.on_ground = false;
            }
        }
    }

    /// Clear per-frame outboxes.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.shakes.clear();
        self.flickers.clear();
        self.projectiles.clear();
        self.played.clear();
    }

    /// How many times `cue` was requested since the last clear.
    pub fn sound_count(&self, cue: SoundCue) -> usize {
        self.sounds.iter().filter(|(c, _)| *c == cue).count()
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerHost for SandboxHost {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn play_animation(&mut self, key: AnimationKey) {
        self.animation.play(key);
        self.played.push(key);
    }

    fn animation_frame(&self) -> Option<usize> {
        self.animation.frame_index()
    }

    fn animation_finished(&self) -> bool {
        self.animation.is_finished()
    }

    fn set_flip_x(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    fn flicker(&mut self, duration_ms: f64, repeats: u32) {
        self.flickers.push((duration_ms, repeats));
    }

    fn play_sound(&mut self, cue: SoundCue, options: SoundOptions) {
        self.sounds.push((cue, options));
    }

    fn shake_camera(&mut self, shake: CameraShake) {
        self.shakes.push(shake);
    }

    fn schedule(&mut self, timer: Timer) {
        self.timers.schedule(self.now, timer);
    }

    fn spawn_projectile(&mut self, spawn: ProjectileSpawn) {
        self.projectiles.push(spawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_stops_fall() {
        let mut host = SandboxHost::new().with_floor(100.0, 600.0);
        host.velocity.y = -200.0;
        host.integrate(0.1);
        assert!(!host.on_ground);
        assert!(host.position.y < 100.0);

        for _ in 0..20 {
            host.integrate(0.1);
        }
        assert!(host.on_ground);
        assert_eq!(host.position.y, 100.0);
        assert_eq!(host.velocity.y, 0.0);
    }

    #[test]
    fn timers_use_host_clock() {
        let mut host = SandboxHost::new();
        host.fire_due(1000.0);
        host.schedule(Timer::once(400.0, TimerEvent::HitSoundReady));
        assert!(host.fire_due(1399.0).is_empty());
        assert_eq!(host.fire_due(1400.0), vec![TimerEvent::HitSoundReady]);
    }

    #[test]
    fn clear_frame_data_empties_outboxes() {
        let mut host = SandboxHost::new();
        host.play_sound(SoundCue::Jump, SoundOptions::default());
        host.shake_camera(CameraShake::HIT);
        host.play_animation(AnimationKey::Idle);
        assert_eq!(host.sound_count(SoundCue::Jump), 1);
        host.clear_frame_data();
        assert!(host.sounds.is_empty());
        assert!(host.shakes.is_empty());
        assert!(host.played.is_empty());
        // Playback state itself survives.
        assert_eq!(host.animation.current(), Some(AnimationKey::Idle));
    }
}
