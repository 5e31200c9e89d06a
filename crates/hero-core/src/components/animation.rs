//! Frame-sequence playback for the player's clips.
//!
//! Tracks which clip is playing and which frame it is on, so a host can
//! answer the core's "which frame?" and "finished?" queries. Drawing the
//! frames is someone else's job.

use std::collections::HashMap;

use crate::api::types::AnimationKey;

/// Definition of a single clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    pub frame_count: usize,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether to wrap to the first frame at the end.
    pub looping: bool,
}

impl AnimationDef {
    pub fn looping(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count,
            frame_duration: 1.0 / fps,
            looping: true,
        }
    }

    pub fn once(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count,
            frame_duration: 1.0 / fps,
            looping: false,
        }
    }
}

/// The stock player clip set.
pub fn player_clips() -> HashMap<AnimationKey, AnimationDef> {
    HashMap::from([
        (AnimationKey::Walk, AnimationDef::looping(12, 20.0)),
        (AnimationKey::Idle, AnimationDef::looping(2, 2.0)),
        (AnimationKey::Jump, AnimationDef::once(1, 20.0)),
        (AnimationKey::Land, AnimationDef::once(1, 20.0)),
        (AnimationKey::Attack, AnimationDef::looping(17, 36.0)),
        (AnimationKey::MeleeAttack, AnimationDef::once(8, 24.0)),
        (AnimationKey::Hit, AnimationDef::once(2, 12.0)),
        (AnimationKey::Die, AnimationDef::once(11, 24.0)),
    ])
}

/// Playback state over a set of clips.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clips: HashMap<AnimationKey, AnimationDef>,
    current: Option<AnimationKey>,
    frame_index: usize,
    frame_timer: f32,
    playing: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new(player_clips())
    }
}

impl AnimationPlayer {
    pub fn new(clips: HashMap<AnimationKey, AnimationDef>) -> Self {
        Self {
            clips,
            current: None,
            frame_index: 0,
            frame_timer: 0.0,
            playing: false,
        }
    }

    /// Play `key` from the first frame.
    ///
    /// An unknown clip stops playback; with nothing current the player
    /// reports itself finished, so one-shot states still complete.
    pub fn play(&mut self, key: AnimationKey) {
        self.frame_index = 0;
        self.frame_timer = 0.0;
        if self.clips.contains_key(&key) {
            self.current = Some(key);
            self.playing = true;
        } else {
            log::error!("no clip registered for {:?}", key);
            self.current = None;
            self.playing = false;
        }
    }

    pub fn current(&self) -> Option<AnimationKey> {
        self.current
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.current.and_then(|key| self.clips.get(&key))
    }

    /// Frame index within the current clip.
    pub fn frame_index(&self) -> Option<usize> {
        self.current.map(|_| self.frame_index)
    }

    /// Jump straight to `frame` in the current clip, clamped to its length.
    pub fn seek(&mut self, frame: usize) {
        if let Some(count) = self.current_def().map(|def| def.frame_count) {
            self.frame_index = frame.min(count.saturating_sub(1));
            self.frame_timer = 0.0;
        }
    }

    /// Whether a non-looping clip has reached its last frame.
    pub fn is_finished(&self) -> bool {
        match self.current_def() {
            Some(def) => !def.looping && self.frame_index >= def.frame_count.saturating_sub(1),
            None => true,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance by `dt` seconds. Returns true if the frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(def) = self.current.and_then(|key| self.clips.get(&key)) else {
            return false;
        };

        if def.frame_count == 0 {
            return false;
        }

        self.frame_timer += dt;
        let mut frame_changed = false;

        while self.frame_timer >= def.frame_duration {
            self.frame_timer -= def.frame_duration;
            self.frame_index += 1;
            frame_changed = true;

            if self.frame_index >= def.frame_count {
                if def.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = def.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }

        frame_changed
    }
}
