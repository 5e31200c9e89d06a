//! Per-tick precedence between removal, death and normal behaviour.

use glam::Vec2;

use crate::api::host::WorldBounds;

/// What a tick is allowed to do, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGate {
    /// Already despawned through the world edge. Nothing runs.
    Despawned,
    /// Left the world this tick. Despawn now, skip the state update.
    OutOfBounds,
    /// Health is gone but Die has not been entered yet.
    Exhausted,
    /// Die is active; keep driving it.
    Dying,
    /// Normal state update.
    Active,
}

/// Evaluate the gate for one tick.
pub fn evaluate(
    is_dead: bool,
    dying: bool,
    health_exhausted: bool,
    position: Vec2,
    bounds: &WorldBounds,
) -> TickGate {
    if is_dead {
        TickGate::Despawned
    } else if bounds.is_outside(position) {
        TickGate::OutOfBounds
    } else if dying {
        TickGate::Dying
    } else if health_exhausted {
        TickGate::Exhausted
    } else {
        TickGate::Active
    }
}
