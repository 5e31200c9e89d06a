use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{
    AnimationKey, CameraShake, ProjectileSpawn, SoundCue, SoundOptions, Timer,
};

/// Size of the playable world, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile width in world units.
    pub tile_width: f32,
    /// Tile height in world units.
    pub tile_height: f32,
}

impl WorldBounds {
    pub fn new(width: u32, height: u32, tile_width: f32, tile_height: f32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
        }
    }

    /// World width in world units.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_width
    }

    /// World height in world units.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_height
    }

    /// Whether `pos` has left the world through the sides or the bottom.
    /// There is no ceiling: jumping above the top edge is allowed.
    pub fn is_outside(&self, pos: Vec2) -> bool {
        pos.x > self.pixel_width() || pos.x < 0.0 || pos.y > self.pixel_height()
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(40, 15, 16.0, 16.0)
    }
}

/// Everything the player core needs from the surrounding game.
///
/// Movement integration, rendering, audio, camera, timers and projectile
/// ownership all live on the other side of this trait. The core only issues
/// requests and reads back the few values it needs to make decisions.
pub trait PlayerHost {
    // -- Movement --

    /// Current position of the player's body.
    fn position(&self) -> Vec2;

    /// Current velocity of the player's body (Y-down).
    fn velocity(&self) -> Vec2;

    fn set_velocity_x(&mut self, vx: f32);

    fn set_velocity_y(&mut self, vy: f32);

    /// Whether the body is resting on the ground this tick.
    fn is_on_ground(&self) -> bool;

    fn world_bounds(&self) -> WorldBounds;

    // -- Animation --

    /// Start `key` from its first frame.
    fn play_animation(&mut self, key: AnimationKey);

    /// Frame index within the clip currently playing, if any.
    fn animation_frame(&self) -> Option<usize>;

    /// Whether a non-looping clip has reached its last frame.
    fn animation_finished(&self) -> bool;

    fn set_flip_x(&mut self, _flipped: bool) {}

    /// Blink the sprite for `duration_ms`, `repeats` times.
    fn flicker(&mut self, _duration_ms: f64, _repeats: u32) {}

    // -- Audio / camera --

    fn play_sound(&mut self, cue: SoundCue, options: SoundOptions);

    fn shake_camera(&mut self, _shake: CameraShake) {}

    // -- Timers --

    /// Schedule a delayed callback relative to the current tick.
    fn schedule(&mut self, timer: Timer);

    // -- Projectiles --

    fn spawn_projectile(&mut self, spawn: ProjectileSpawn);
}
