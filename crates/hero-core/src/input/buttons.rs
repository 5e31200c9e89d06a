use crate::config::KeyBindings;
use crate::input::commands::Commands;

/// Raw input events from the host's keyboard layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Focus lost: treat every key as released.
    ReleaseAll,
}

/// Logical buttons the player responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Left,
    Right,
    Attack,
    MeleeAttack,
}

impl Button {
    /// Look up which button a key code is bound to.
    pub fn from_key(key_code: u32, bindings: &KeyBindings) -> Option<Button> {
        match key_code {
            k if k == bindings.up => Some(Button::Up),
            k if k == bindings.left => Some(Button::Left),
            k if k == bindings.right => Some(Button::Right),
            k if k == bindings.attack => Some(Button::Attack),
            k if k == bindings.melee_attack => Some(Button::MeleeAttack),
            _ => None,
        }
    }
}

/// Which logical buttons are currently held down.
///
/// Held state only: "just pressed" edges are left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    held: Commands,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input event into the held state. Unbound keys are ignored.
    pub fn apply(&mut self, event: InputEvent, bindings: &KeyBindings) {
        match event {
            InputEvent::KeyDown { key_code } => {
                if let Some(button) = Button::from_key(key_code, bindings) {
                    self.set(button, true);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(button) = Button::from_key(key_code, bindings) {
                    self.set(button, false);
                }
            }
            InputEvent::ReleaseAll => self.held = Commands::NONE,
        }
    }

    pub fn set(&mut self, button: Button, down: bool) {
        let slot = match button {
            Button::Up => &mut self.held.up,
            Button::Left => &mut self.held.left,
            Button::Right => &mut self.held.right,
            Button::Attack => &mut self.held.attack,
            Button::MeleeAttack => &mut self.held.melee_attack,
        };
        *slot = down;
    }

    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Up => self.held.up,
            Button::Left => self.held.left,
            Button::Right => self.held.right,
            Button::Attack => self.held.attack,
            Button::MeleeAttack => self.held.melee_attack,
        }
    }

    /// This tick's command snapshot.
    pub fn snapshot(&self) -> Commands {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_and_up() {
        let bindings = KeyBindings::default();
        let mut buttons = ButtonState::new();
        buttons.apply(InputEvent::KeyDown { key_code: bindings.attack }, &bindings);
        assert!(buttons.snapshot().attack);
        buttons.apply(InputEvent::KeyUp { key_code: bindings.attack }, &bindings);
        assert!(!buttons.snapshot().attack);
    }

    #[test]
    fn unbound_keys_ignored() {
        let bindings = KeyBindings::default();
        let mut buttons = ButtonState::new();
        buttons.apply(InputEvent::KeyDown { key_code: 12345 }, &bindings);
        assert_eq!(buttons.snapshot(), Commands::NONE);
    }

    #[test]
    fn release_all_clears() {
        let bindings = KeyBindings::default();
        let mut buttons = ButtonState::new();
        buttons.set(Button::Left, true);
        buttons.set(Button::Up, true);
        buttons.apply(InputEvent::ReleaseAll, &bindings);
        assert_eq!(buttons.snapshot(), Commands::NONE);
    }

    #[test]
    fn custom_bindings() {
        let bindings = KeyBindings {
            melee_attack: 67,
            ..Default::default()
        };
        assert_eq!(Button::from_key(67, &bindings), Some(Button::MeleeAttack));
        assert_eq!(Button::from_key(88, &bindings), None);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut buttons = ButtonState::new();
        buttons.set(Button::Right, true);
        let snap = buttons.snapshot();
        buttons.set(Button::Right, false);
        assert!(snap.right);
        assert!(!buttons.is_down(Button::Right));
    }
}
