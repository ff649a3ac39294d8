//! Health and lifecycle
//!
//! Dying and being safe to remove are separate steps: damage makes an actor
//! dead immediately, but it only becomes disposable once the animation layer
//! has played its death clip to the end.

use serde::{Deserialize, Serialize};

/// What a damage event did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed
    Ignored,
    /// Target survived and entered hit reaction
    Hit,
    /// Target's health reached zero
    Killed,
}

/// Health and lifecycle flags of one actor.
///
/// Invariants: `0 <= health <= max`, `is_dead` implies `health == 0`,
/// `is_disposable` implies `is_dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    /// In hit reaction
    pub is_hit: bool,
    pub is_dead: bool,
    /// Death clip finished; may be removed from its collection
    pub is_disposable: bool,
}

impl Vitals {
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health.max(0),
            is_hit: false,
            is_dead: false,
            is_disposable: false,
        }
    }

    /// Apply `amount` damage.
    ///
    /// No-op on a dead actor. Health is clamped at zero; reaching zero kills,
    /// anything else starts a hit reaction. Negative amounts are treated as
    /// zero damage.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            self.is_dead = true;
            self.is_hit = false;
            DamageOutcome::Killed
        } else {
            self.is_hit = true;
            DamageOutcome::Hit
        }
    }

    /// Called by the animation layer when the death clip ends
    pub fn mark_disposable(&mut self) {
        if self.is_dead {
            self.is_disposable = true;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }
}
