//! Player tuning and key bindings.
//!
//! Every field has a default, so a config file only needs to list what it
//! overrides. `PlayerConfig::from_json("{}")` yields the stock player.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::AnimationKey;
use crate::components::animation::player_clips;

/// Errors raised while loading a [`PlayerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed player config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_health must be at least 1, got {0}")]
    MaxHealth(i32),

    #[error("`{0}` must be a finite, non-negative number")]
    Negative(&'static str),

    #[error("key code {0} is bound to more than one button")]
    DuplicateBinding(u32),

    #[error("attack_keyframe {keyframe} is outside the {frames}-frame attack clip")]
    Keyframe { keyframe: usize, frames: usize },
}

/// Key codes mapped to the player's logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: u32,
    pub left: u32,
    pub right: u32,
    pub attack: u32,
    pub melee_attack: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        // DOM key codes: arrows, space, X.
        Self {
            up: 38,
            left: 37,
            right: 39,
            attack: 32,
            melee_attack: 88,
        }
    }
}

impl KeyBindings {
    fn codes(&self) -> [u32; 5] {
        [self.up, self.left, self.right, self.attack, self.melee_attack]
    }
}

/// Tunables for a single player entity. Times are in milliseconds,
/// speeds in world units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal walking (and air control) speed.
    pub speed: f32,
    /// Upward velocity applied by a jump.
    pub jump_power: f32,
    /// Minimum time between two jumps.
    pub jump_delay_ms: f64,
    /// Starting and maximum health.
    pub max_health: i32,
    /// Damage immunity after a non-lethal hit.
    pub invincibility_ms: f64,
    /// How many times the sprite blinks during the invincibility window.
    pub flicker_repeats: u32,
    /// Minimum gap between two hit sounds.
    pub hit_sound_cooldown_ms: f64,
    /// Length of the Hit stagger. Zero skips the Hit state entirely.
    pub hit_stagger_ms: f64,
    /// Damage carried by spawned projectiles.
    pub shot_power: u32,
    /// Attack clip frame index at which the projectile is released.
    /// Validated against the stock clip set; hosts with their own clips
    /// must keep it inside their attack clip.
    pub attack_keyframe: usize,
    /// Whether attacking is allowed mid-jump.
    pub air_attack: bool,
    /// Width of the random pitch variation on jump and attack sounds, in cents.
    pub detune_range: f32,
    /// Seed for the sound-variation RNG.
    pub seed: u64,
    pub bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 140.0,
            jump_power: 200.0,
            jump_delay_ms: 200.0,
            max_health: 3,
            invincibility_ms: 400.0,
            flicker_repeats: 3,
            hit_sound_cooldown_ms: 150.0,
            hit_stagger_ms: 0.0,
            shot_power: 1,
            attack_keyframe: 12,
            air_attack: false,
            detune_range: 50.0,
            seed: 42,
            bindings: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the player relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health < 1 {
            return Err(ConfigError::MaxHealth(self.max_health));
        }

        let floats = [
            ("speed", self.speed as f64),
            ("jump_power", self.jump_power as f64),
            ("jump_delay_ms", self.jump_delay_ms),
            ("invincibility_ms", self.invincibility_ms),
            ("hit_sound_cooldown_ms", self.hit_sound_cooldown_ms),
            ("hit_stagger_ms", self.hit_stagger_ms),
            ("detune_range", self.detune_range as f64),
        ];
        for (field, value) in floats {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative(field));
            }
        }

        let frames = player_clips()
            .get(&AnimationKey::Attack)
            .map_or(0, |def| def.frame_count);
        if self.attack_keyframe >= frames {
            return Err(ConfigError::Keyframe {
                keyframe: self.attack_keyframe,
                frames,
            });
        }

        let codes = self.bindings.codes();
        for (i, code) in codes.iter().enumerate() {
            if codes[i + 1..].contains(code) {
                return Err(ConfigError::DuplicateBinding(*code));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = PlayerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.invincibility_ms, 400.0);
        assert_eq!(config.jump_delay_ms, 200.0);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "speed": 90.0,
            "air_attack": true,
            "bindings": { "attack": 90 }
        }"#;
        let config = PlayerConfig::from_json(json).unwrap();
        assert_eq!(config.speed, 90.0);
        assert!(config.air_attack);
        assert_eq!(config.bindings.attack, 90);
        assert_eq!(config.bindings.up, 38);
        assert_eq!(config.max_health, 3);
    }

    #[test]
    fn json_round_trip() {
        let config = PlayerConfig {
            max_health: 5,
            hit_stagger_ms: 120.0,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(PlayerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_zero_max_health() {
        let err = PlayerConfig::from_json(r#"{ "max_health": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::MaxHealth(0)));
    }

    #[test]
    fn rejects_negative_durations() {
        let err = PlayerConfig::from_json(r#"{ "invincibility_ms": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("invincibility_ms")));
    }

    #[test]
    fn rejects_duplicate_bindings() {
        let err = PlayerConfig::from_json(r#"{ "bindings": { "melee_attack": 32 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBinding(32)));
    }

    #[test]
    fn keyframe_must_fit_attack_clip() {
        assert!(PlayerConfig::from_json(r#"{ "attack_keyframe": 0 }"#).is_ok());
        assert!(PlayerConfig::from_json(r#"{ "attack_keyframe": 16 }"#).is_ok());
        let err = PlayerConfig::from_json(r#"{ "attack_keyframe": 17 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Keyframe {
                keyframe: 17,
                frames: 17
            }
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = PlayerConfig::from_json("{ speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("malformed player config"));
    }
}
