//! Health, maximum health and score.
//!
//! `Vitals` only does the arithmetic. Gating by invincibility, death
//! handling and hit feedback are layered on top by `Player`.

use serde::{Deserialize, Serialize};

/// Numeric health/score model with bounded deltas.
///
/// Invariant: `0 <= health <= max_health` and `max_health >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    health: i32,
    max_health: i32,
    score: u32,
}

impl Vitals {
    /// Full health at `max_health` (raised to 1 if lower).
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            score: 0,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_full(&self) -> bool {
        self.health >= self.max_health
    }

    /// Death predicate.
    pub fn is_exhausted(&self) -> bool {
        self.health <= 0
    }

    /// Remove `amount` health, flooring at zero. Returns false for zero.
    pub fn damage(&mut self, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount).max(0);
        true
    }

    /// Restore up to `amount` health. No-op at full health.
    pub fn heal(&mut self, amount: u32) -> bool {
        if amount == 0 || self.is_full() {
            return false;
        }
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_add(amount).min(self.max_health);
        true
    }

    /// Grow or shrink the health ceiling, clamping health down if needed.
    ///
    /// A change that would leave `max_health` below 1 is ignored. Shrinking
    /// never counts as damage: health can reach the new ceiling but is never
    /// driven to zero by this call.
    pub fn change_max_health(&mut self, delta: i32) -> bool {
        if delta == 0 {
            return false;
        }
        let new_max = self.max_health.saturating_add(delta);
        if new_max < 1 {
            log::warn!(
                "ignoring max health change {} (would leave max at {})",
                delta,
                new_max
            );
            return false;
        }
        self.max_health = new_max;
        if self.health > self.max_health {
            self.health = self.max_health;
        }
        true
    }

    /// Add to the score. Returns false only for zero.
    pub fn add_score(&mut self, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        self.score = self.score.saturating_add(amount);
        true
    }
}

/// A combined pickup/hazard payload. Absent and zero components are
/// both treated as "no change".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Effect {
    /// Positive heals, negative damages.
    pub health: Option<i32>,
    pub max_health: Option<i32>,
    pub score: Option<u32>,
}

impl Effect {
    pub fn health(delta: i32) -> Self {
        Self {
            health: Some(delta),
            ..Default::default()
        }
    }

    pub fn max_health(delta: i32) -> Self {
        Self {
            max_health: Some(delta),
            ..Default::default()
        }
    }

    pub fn score(amount: u32) -> Self {
        Self {
            score: Some(amount),
            ..Default::default()
        }
    }

    pub fn with_health(mut self, delta: i32) -> Self {
        self.health = Some(delta);
        self
    }

    pub fn with_max_health(mut self, delta: i32) -> Self {
        self.max_health = Some(delta);
        self
    }

    pub fn with_score(mut self, amount: u32) -> Self {
        self.score = Some(amount);
        self
    }

    /// Parse an effect payload, e.g. from a pickup definition.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Health component, with zero folded into `None`.
    pub fn health_delta(&self) -> Option<i32> {
        self.health.filter(|&d| d != 0)
    }

    pub fn max_health_delta(&self) -> Option<i32> {
        self.max_health.filter(|&d| d != 0)
    }

    pub fn score_delta(&self) -> Option<u32> {
        self.score.filter(|&d| d != 0)
    }
}
