use crate::config::PlayerConfig;
use crate::core::health::Effect;
use crate::core::time::FixedTimestep;
use crate::input::buttons::{ButtonState, InputEvent};
use crate::player::Player;
use crate::sandbox::host::SandboxHost;

/// Fixed-rate loop that owns one player and its sandbox host.
///
/// Per tick: due timers are handed to the player, the player updates with
/// the held buttons, then animation and movement advance by one step.
pub struct Session {
    player: Player,
    host: SandboxHost,
    buttons: ButtonState,
    pending: Vec<InputEvent>,
    timestep: FixedTimestep,
    finished_logged: bool,
}

impl Session {
    pub fn new(config: PlayerConfig, mut host: SandboxHost) -> Self {
        let player = Player::spawn(config, &mut host);
        Self {
            player,
            host,
            buttons: ButtonState::new(),
            pending: Vec::with_capacity(16),
            timestep: FixedTimestep::new(1.0 / 60.0),
            finished_logged: false,
        }
    }

    pub fn with_timestep(mut self, timestep: FixedTimestep) -> Self {
        self.timestep = timestep;
        self
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Run one frame of `frame_dt` seconds. Returns the number of fixed
    /// ticks that ran.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        self.host.clear_frame_data();

        let bindings = self.player.config().bindings;
        for event in self.pending.drain(..) {
            self.buttons.apply(event, &bindings);
        }

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run exactly one fixed tick, bypassing the accumulator.
    pub fn step(&mut self) {
        if self.is_over() {
            if !self.finished_logged {
                self.finished_logged = true;
                log::info!("session over at {} ms", self.timestep.now_ms());
            }
            return;
        }

        let now = self.timestep.advance();
        for event in self.host.fire_due(now) {
            self.player.on_timer(event, &mut self.host);
        }
        self.player.update(self.buttons.snapshot(), now, &mut self.host);

        let dt = self.timestep.dt();
        self.host.tick_animation(dt);
        self.host.integrate(dt);
    }

    /// Combat resolution entry point: damage the player now.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.player.apply_damage(amount, &mut self.host)
    }

    /// Pickup/hazard entry point.
    pub fn apply_effect(&mut self, effect: &Effect) -> bool {
        self.player.apply_effect(effect, &mut self.host)
    }

    /// The player has been removed and the loop no longer updates it.
    pub fn is_over(&self) -> bool {
        self.player.is_removed()
    }

    pub fn now(&self) -> f64 {
        self.timestep.now_ms()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn host(&self) -> &SandboxHost {
        &self.host
    }

    pub fn buttons(&self) -> &ButtonState {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::state::StateKind;

    #[test]
    fn frames_become_ticks() {
        let mut session = Session::new(PlayerConfig::default(), SandboxHost::new());
        let mut total = 0;
        for _ in 0..10 {
            total += session.tick(0.05);
        }
        // 0.5 s at 60 Hz, give or take rounding
        assert!((29..=30).contains(&total), "ran {} ticks", total);
        assert!(session.now() > 480.0);
    }

    #[test]
    fn key_events_reach_player() {
        let mut session = Session::new(PlayerConfig::default(), SandboxHost::new());
        let right = session.player().config().bindings.right;
        session.push_input(InputEvent::KeyDown { key_code: right });
        session.tick(0.05);
        assert!(session.buttons().snapshot().right);
        assert_eq!(session.player().state_kind(), StateKind::Walk);

        session.push_input(InputEvent::KeyUp { key_code: right });
        session.tick(0.05);
        assert_eq!(session.player().state_kind(), StateKind::Idle);
    }
}
