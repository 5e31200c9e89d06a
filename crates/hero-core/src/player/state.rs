//! The player's behaviour states.
//!
//! Each state decides for itself which transitions it offers; there is no
//! global transition table. `update` returns the state to switch to, and
//! the player swaps it in wholesale.

use crate::api::host::PlayerHost;
use crate::api::types::{AnimationKey, SoundCue};
use crate::input::commands::Commands;
use crate::player::Player;

/// Discriminant of [`PlayerState`], for matching without the bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Walk,
    Jump,
    Attack,
    MeleeAttack,
    Hit,
    Die,
}

/// The active behaviour of a player. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerState {
    Idle,
    Walk,
    Jump {
        /// The host has reported the body off the ground at least once.
        airborne: bool,
        /// Past the apex; the landing pose is showing.
        falling: bool,
    },
    Attack {
        /// Clip frame seen on the previous poll; `None` until the first one.
        last_frame: Option<usize>,
    },
    MeleeAttack,
    Hit {
        since_ms: f64,
    },
    Die {
        removal_signalled: bool,
    },
}

impl PlayerState {
    pub fn jump() -> Self {
        PlayerState::Jump {
            airborne: false,
            falling: false,
        }
    }

    pub fn attack() -> Self {
        PlayerState::Attack { last_frame: None }
    }

    pub fn hit(now: f64) -> Self {
        PlayerState::Hit { since_ms: now }
    }

    pub fn die() -> Self {
        PlayerState::Die {
            removal_signalled: false,
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            PlayerState::Idle => StateKind::Idle,
            PlayerState::Walk => StateKind::Walk,
            PlayerState::Jump { .. } => StateKind::Jump,
            PlayerState::Attack { .. } => StateKind::Attack,
            PlayerState::MeleeAttack => StateKind::MeleeAttack,
            PlayerState::Hit { .. } => StateKind::Hit,
            PlayerState::Die { .. } => StateKind::Die,
        }
    }

    /// Die has no way out.
    pub fn is_terminal(&self) -> bool {
        self.kind() == StateKind::Die
    }

    pub(crate) fn on_enter<H: PlayerHost>(&mut self, player: &mut Player, host: &mut H) {
        match self {
            PlayerState::Idle => {
                player.halt(host);
                host.play_animation(AnimationKey::Idle);
            }
            PlayerState::Walk => host.play_animation(AnimationKey::Walk),
            PlayerState::Jump { .. } => host.play_animation(AnimationKey::Jump),
            // The keyframe is polled in update, so there is no listener to
            // remove when the attack ends.
            PlayerState::Attack { .. } => host.play_animation(AnimationKey::Attack),
            PlayerState::MeleeAttack => {
                host.play_animation(AnimationKey::MeleeAttack);
                player.play_cue(SoundCue::MeleeSwing, host);
            }
            PlayerState::Hit { .. } => {
                player.halt(host);
                host.play_animation(AnimationKey::Hit);
            }
            PlayerState::Die { .. } => {
                player.halt(host);
                host.play_animation(AnimationKey::Die);
                player.play_cue(SoundCue::Death, host);
            }
        }
    }

    pub(crate) fn update<H: PlayerHost>(
        &mut self,
        player: &mut Player,
        commands: Commands,
        now: f64,
        host: &mut H,
    ) -> Option<PlayerState> {
        match self {
            PlayerState::Idle => {
                if commands.up && player.try_jump(now, host) {
                    return Some(PlayerState::jump());
                }
                if commands.attack {
                    return Some(PlayerState::attack());
                }
                let facing = commands.horizontal()?;
                player.run(facing, host);
                Some(PlayerState::Walk)
            }

            PlayerState::Walk => {
                if commands.up && player.try_jump(now, host) {
                    return Some(PlayerState::jump());
                }
                if commands.attack {
                    return Some(PlayerState::attack());
                }
                match commands.horizontal() {
                    Some(facing) => {
                        player.run(facing, host);
                        None
                    }
                    None => Some(PlayerState::Idle),
                }
            }

            PlayerState::Jump { airborne, falling } => {
                if let Some(facing) = commands.horizontal() {
                    player.run(facing, host);
                }
                if commands.attack && player.config().air_attack {
                    return Some(PlayerState::attack());
                }

                let grounded = host.is_on_ground();
                let rising = host.velocity().y < 0.0;
                if !grounded {
                    *airborne = true;
                }
                // A jump the host never lifted off counts as landed once
                // the impulse is gone.
                if grounded && (*airborne || !rising) {
                    return Some(match commands.horizontal() {
                        Some(_) => PlayerState::Walk,
                        None => PlayerState::Idle,
                    });
                }
                if *airborne && !*falling && !rising {
                    *falling = true;
                    host.play_animation(AnimationKey::Land);
                }
                None
            }

            PlayerState::Attack { last_frame } => {
                let keyframe = player.config().attack_keyframe;
                if let Some(frame) = host.animation_frame() {
                    if keyframe_reached(*last_frame, frame, keyframe) {
                        player.release_projectile(host);
                    }
                    *last_frame = Some(frame);
                }

                if !commands.attack {
                    return Some(PlayerState::Idle);
                }
                if commands.melee_attack {
                    return Some(PlayerState::MeleeAttack);
                }
                None
            }

            PlayerState::MeleeAttack => {
                if host.animation_finished() {
                    Some(PlayerState::Idle)
                } else {
                    None
                }
            }

            PlayerState::Hit { since_ms } => {
                if now - *since_ms >= player.config().hit_stagger_ms {
                    Some(PlayerState::Idle)
                } else {
                    None
                }
            }

            PlayerState::Die { removal_signalled } => {
                if !*removal_signalled && host.animation_finished() {
                    *removal_signalled = true;
                    player.request_removal();
                }
                None
            }
        }
    }
}

/// Whether the clip passed `keyframe` since the previous poll.
///
/// A frame lower than the previous one means the clip wrapped: either the
/// old pass reached the keyframe before ending or the new one reached it
/// after starting.
fn keyframe_reached(last: Option<usize>, frame: usize, keyframe: usize) -> bool {
    match last {
        None => frame >= keyframe,
        Some(last) if frame < last => last < keyframe || frame >= keyframe,
        Some(last) => last < keyframe && keyframe <= frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframe_within_a_pass() {
        assert!(!keyframe_reached(None, 0, 12));
        assert!(keyframe_reached(Some(11), 12, 12));
        assert!(keyframe_reached(Some(5), 13, 12));
        assert!(!keyframe_reached(Some(12), 12, 12));
        assert!(!keyframe_reached(Some(13), 16, 12));
    }

    #[test]
    fn keyframe_across_a_wrap() {
        // 11 -> end -> 1 went through frame 12.
        assert!(keyframe_reached(Some(11), 1, 12));
        assert!(keyframe_reached(Some(14), 13, 12));
        assert!(!keyframe_reached(Some(14), 2, 12));
    }

    #[test]
    fn first_frame_keyframe_fires_on_every_pass() {
        assert!(keyframe_reached(None, 0, 0));
        assert!(!keyframe_reached(Some(0), 5, 0));
        assert!(keyframe_reached(Some(16), 0, 0));
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(PlayerState::Idle.kind(), StateKind::Idle);
        assert_eq!(PlayerState::jump().kind(), StateKind::Jump);
        assert_eq!(PlayerState::attack().kind(), StateKind::Attack);
        assert_eq!(PlayerState::hit(5.0).kind(), StateKind::Hit);
        assert_eq!(PlayerState::die().kind(), StateKind::Die);
    }

    #[test]
    fn only_die_is_terminal() {
        assert!(PlayerState::die().is_terminal());
        for state in [
            PlayerState::Idle,
            PlayerState::Walk,
            PlayerState::jump(),
            PlayerState::attack(),
            PlayerState::MeleeAttack,
            PlayerState::hit(0.0),
        ] {
            assert!(!state.is_terminal(), "{:?}", state);
        }
    }
}
