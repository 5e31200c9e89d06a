// core/timer.rs
//
// Delayed-callback queue. Callbacks are plain `TimerEvent` values; the owner
// routes fired events to whoever handles them.
//
// Usage:
//   let mut timers = TimerQueue::new();
//   timers.schedule(now, Timer::once(400.0, TimerEvent::HitSoundReady));
//   for event in timers.advance(now + 400.0) { player.on_timer(event, host); }

use crate::api::types::{Timer, TimerEvent};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    due_ms: f64,
    interval_ms: f64,
    repeats_left: u32,
    event: TimerEvent,
}

/// Pending timers, fired in due-time order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Pending>,
    next_id: u32,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `timer` relative to `now`. Returns a handle for cancellation.
    pub fn schedule(&mut self, now: f64, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let interval_ms = timer.delay_ms.max(0.0);
        self.pending.push(Pending {
            id,
            due_ms: now + interval_ms,
            interval_ms,
            repeats_left: timer.repeat,
            event: timer.event,
        });
        id
    }

    /// Cancel a timer. Returns true if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Fire everything due at or before `now`, earliest first.
    /// Repeating timers re-arm and may fire several times in one call.
    pub fn advance(&mut self, now: f64) -> Vec<TimerEvent> {
        let mut fired: Vec<(f64, TimerId, TimerEvent)> = Vec::new();

        self.pending.retain_mut(|p| loop {
            if p.due_ms > now {
                return true;
            }
            fired.push((p.due_ms, p.id, p.event));
            if p.repeats_left == 0 {
                return false;
            }
            p.repeats_left -= 1;
            p.due_ms += p.interval_ms;
            if p.interval_ms <= 0.0 {
                // Zero-interval repeats all land on this tick.
                for _ in 0..=p.repeats_left {
                    fired.push((p.due_ms, p.id, p.event));
                }
                return false;
            }
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, event)| event).collect()
    }

    /// Due time of the next pending timer.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due_ms).min_by(|a, b| a.total_cmp(b))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
