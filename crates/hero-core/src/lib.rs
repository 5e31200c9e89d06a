pub mod api;
pub mod components;
pub mod config;
pub mod core;
pub mod input;
pub mod player;
pub mod sandbox;

// Re-export key types at crate root for convenience
pub use api::host::{PlayerHost, WorldBounds};
pub use api::types::{
    AnimationKey, CameraShake, Facing, ProjectileSpawn, SoundCue, SoundOptions, Timer,
    TimerEvent,
};
pub use components::animation::{AnimationDef, AnimationPlayer};
pub use config::{ConfigError, KeyBindings, PlayerConfig};
pub use crate::core::cooldown::Cooldown;
pub use crate::core::health::{Effect, Vitals};
pub use crate::core::invincibility::Invincibility;
pub use crate::core::time::FixedTimestep;
pub use crate::core::timer::{TimerId, TimerQueue};
pub use input::buttons::{Button, ButtonState, InputEvent};
pub use input::commands::Commands;
pub use player::state::{PlayerState, StateKind};
pub use player::Player;
pub use sandbox::host::SandboxHost;
pub use sandbox::session::Session;
