//! The player entity: state machine, health, invincibility and cooldowns.

pub mod boundary;
pub mod state;

use crate::api::host::PlayerHost;
use crate::api::types::{
    CameraShake, Facing, ProjectileSpawn, SoundCue, SoundOptions, Timer, TimerEvent,
};
use crate::config::PlayerConfig;
use crate::core::cooldown::Cooldown;
use crate::core::health::{Effect, Vitals};
use crate::core::invincibility::Invincibility;
use crate::core::rng::Rng;
use crate::input::commands::Commands;
use boundary::TickGate;
use state::{PlayerState, StateKind};

const HIT_SOUND_VOLUME: f32 = 0.5;

/// The player character's behavioural core.
///
/// Owned by the game loop. The body, sprite, sounds and timers belong to the
/// host and are reached through [`PlayerHost`]; everything else lives here
/// and only changes through the methods below.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    state: PlayerState,
    vitals: Vitals,
    invincibility: Invincibility,
    jump: Cooldown,
    rng: Rng,
    facing: Facing,
    hit_sound_ready: bool,
    /// Latched when health runs out. Never cleared.
    dying: bool,
    /// Latched when the body leaves the world. Never cleared.
    is_dead: bool,
    /// Set once the death sequence has finished playing.
    removal_requested: bool,
    /// Time of the most recent tick.
    now: f64,
}

impl Player {
    /// A player in Idle at full health. No host requests are made; use
    /// [`Player::spawn`] to also run Idle's entry actions.
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            state: PlayerState::Idle,
            vitals: Vitals::new(config.max_health),
            invincibility: Invincibility::new(),
            jump: Cooldown::new(config.jump_delay_ms),
            rng: Rng::new(config.seed),
            facing: Facing::default(),
            hit_sound_ready: true,
            dying: false,
            is_dead: false,
            removal_requested: false,
            now: 0.0,
            config,
        }
    }

    /// Create the player and enter the initial Idle state.
    pub fn spawn<H: PlayerHost>(config: PlayerConfig, host: &mut H) -> Self {
        let mut player = Self::new(config);
        let mut idle = PlayerState::Idle;
        idle.on_enter(&mut player, host);
        player.state = idle;
        log::info!("player spawned with {} health", player.vitals.health());
        player
    }

    // -- Per-tick update --

    /// Run one tick.
    ///
    /// Order: world bounds first (leaving the world despawns immediately and
    /// skips everything else), then an already-latched death keeps driving
    /// Die, then the active state's own update.
    pub fn update<H: PlayerHost>(&mut self, commands: Commands, now: f64, host: &mut H) {
        self.now = now;

        let gate = boundary::evaluate(
            self.is_dead,
            self.dying,
            self.vitals.is_exhausted(),
            host.position(),
            &host.world_bounds(),
        );
        match gate {
            TickGate::Despawned => return,
            TickGate::OutOfBounds => {
                self.on_out_of_bounds(host);
                return;
            }
            TickGate::Exhausted => self.on_dying(host),
            TickGate::Dying | TickGate::Active => {}
        }

        let was_dying = self.dying;
        let mut state = self.state;
        let next = state.update(self, commands, now, host);
        if self.dying != was_dying {
            // Die was forced while the state ran; it wins.
            return;
        }
        self.state = state;
        if let Some(next) = next {
            self.enter(next, host);
        }
    }

    /// Handle a timer scheduled earlier. Ignored once the player is removed.
    pub fn on_timer<H: PlayerHost>(&mut self, event: TimerEvent, _host: &mut H) {
        if self.is_removed() {
            log::debug!("dropping {:?}: player removed", event);
            return;
        }
        match event {
            TimerEvent::InvincibilityExpired { grant } => {
                if self.invincibility.expire(grant) {
                    log::debug!("invincibility {} expired", grant);
                }
            }
            TimerEvent::HitSoundReady => self.hit_sound_ready = true,
        }
    }

    // -- Health model --

    /// Take `amount` damage.
    ///
    /// Rejected (returns false, nothing changes) while dying, while
    /// invincible, or for a zero amount. A hit that leaves health above zero
    /// opens the invincibility window; a hit that empties it starts the
    /// death sequence instead.
    pub fn apply_damage<H: PlayerHost>(&mut self, amount: u32, host: &mut H) -> bool {
        if self.dying || self.is_dead || amount == 0 {
            return false;
        }
        if self.invincibility.is_active() {
            return false;
        }

        self.vitals.damage(amount);
        host.shake_camera(CameraShake::HIT);
        self.play_hit_sound(host);

        if self.vitals.is_exhausted() {
            self.on_dying(host);
        } else {
            self.grant_invincibility(host);
            if self.config.hit_stagger_ms > 0.0 {
                self.enter(PlayerState::hit(self.now), host);
            }
        }
        true
    }

    /// Restore up to `amount` health, never past the maximum.
    /// Healing does not undo a death already in progress.
    pub fn heal(&mut self, amount: u32) -> bool {
        self.vitals.heal(amount)
    }

    /// Grow or shrink max health. Shrinking clamps health but never kills.
    pub fn change_max_health(&mut self, delta: i32) -> bool {
        self.vitals.change_max_health(delta)
    }

    pub fn add_score(&mut self, amount: u32) -> bool {
        self.vitals.add_score(amount)
    }

    /// Apply a combined effect in the order health, score, max health.
    ///
    /// Health goes first so a heal is capped by the ceiling as it was before
    /// the same effect raises it. Returns whether anything changed.
    pub fn apply_effect<H: PlayerHost>(&mut self, effect: &Effect, host: &mut H) -> bool {
        let mut affected = false;
        if let Some(delta) = effect.health_delta() {
            affected = if delta > 0 {
                self.heal(delta.unsigned_abs())
            } else {
                self.apply_damage(delta.unsigned_abs(), host)
            };
        }
        if let Some(amount) = effect.score_delta() {
            affected |= self.add_score(amount);
        }
        if let Some(delta) = effect.max_health_delta() {
            affected |= self.change_max_health(delta);
        }
        affected
    }

    // -- Jump cooldown --

    /// Jump if enough time has passed since the last one.
    pub fn try_jump<H: PlayerHost>(&mut self, now: f64, host: &mut H) -> bool {
        if !self.jump.try_fire(now) {
            return false;
        }
        host.set_velocity_y(-self.config.jump_power);
        self.play_cue(SoundCue::Jump, host);
        true
    }

    // -- Accessors --

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn state_kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn health(&self) -> i32 {
        self.vitals.health()
    }

    pub fn max_health(&self) -> i32 {
        self.vitals.max_health()
    }

    pub fn score(&self) -> u32 {
        self.vitals.score()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn invincible_until(&self) -> Option<f64> {
        self.invincibility.expires_at()
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    /// Left the world bounds.
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// The death sequence has finished.
    pub fn removal_requested(&self) -> bool {
        self.removal_requested
    }

    /// Either terminal condition has been reached; the host should despawn.
    pub fn is_removed(&self) -> bool {
        self.is_dead || self.removal_requested
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn last_jump_ms(&self) -> f64 {
        self.jump.last_ms()
    }

    // -- Capabilities used by the states --

    pub(crate) fn run<H: PlayerHost>(&mut self, facing: Facing, host: &mut H) {
        if facing != self.facing {
            self.facing = facing;
            host.set_flip_x(facing.is_flipped());
        }
        host.set_velocity_x(facing.sign() * self.config.speed);
    }

    pub(crate) fn halt<H: PlayerHost>(&mut self, host: &mut H) {
        host.set_velocity_x(0.0);
    }

    pub(crate) fn release_projectile<H: PlayerHost>(&mut self, host: &mut H) {
        let origin = host.position();
        host.spawn_projectile(ProjectileSpawn {
            origin,
            power: self.config.shot_power,
            facing: self.facing,
        });
        self.play_cue(SoundCue::Attack, host);
    }

    /// Play a cue, detuned for the ones that repeat a lot.
    pub(crate) fn play_cue<H: PlayerHost>(&mut self, cue: SoundCue, host: &mut H) {
        let options = match cue {
            SoundCue::Jump | SoundCue::Attack | SoundCue::MeleeSwing => {
                SoundOptions::default().with_detune(self.rng.detune(self.config.detune_range))
            }
            SoundCue::Hit => SoundOptions::default().with_volume(HIT_SOUND_VOLUME),
            SoundCue::Death => SoundOptions::default(),
        };
        host.play_sound(cue, options);
    }

    pub(crate) fn request_removal(&mut self) {
        if !self.removal_requested {
            self.removal_requested = true;
            log::info!("player death sequence finished; removing");
        }
    }

    // -- Internals --

    fn enter<H: PlayerHost>(&mut self, next: PlayerState, host: &mut H) {
        if self.state.is_terminal() {
            log::warn!(
                "ignoring {:?} -> {:?}: Die is terminal",
                self.state.kind(),
                next.kind()
            );
            return;
        }
        log::debug!("player {:?} -> {:?}", self.state.kind(), next.kind());
        let mut next = next;
        next.on_enter(self, host);
        self.state = next;
    }

    /// Latch `dying` and force Die, whatever the current state.
    fn on_dying<H: PlayerHost>(&mut self, host: &mut H) {
        if self.dying {
            return;
        }
        self.dying = true;
        log::info!("player health exhausted; entering Die");
        self.enter(PlayerState::die(), host);
    }

    fn on_out_of_bounds<H: PlayerHost>(&mut self, host: &mut H) {
        self.is_dead = true;
        host.shake_camera(CameraShake::OUT_OF_BOUNDS);
        log::info!("player left the world at {:?}", host.position());
    }

    fn grant_invincibility<H: PlayerHost>(&mut self, host: &mut H) {
        let duration = self.config.invincibility_ms;
        let grant = self.invincibility.grant(self.now, duration);
        host.schedule(Timer::once(
            duration,
            TimerEvent::InvincibilityExpired { grant },
        ));
        host.flicker(duration, self.config.flicker_repeats);
        log::debug!("invincible for {} ms (grant {})", duration, grant);
    }

    fn play_hit_sound<H: PlayerHost>(&mut self, host: &mut H) {
        if !self.hit_sound_ready {
            return;
        }
        self.play_cue(SoundCue::Hit, host);
        let cooldown = self.config.hit_sound_cooldown_ms;
        if cooldown > 0.0 {
            self.hit_sound_ready = false;
            host.schedule(Timer::once(cooldown, TimerEvent::HitSoundReady));
        }
    }
}
