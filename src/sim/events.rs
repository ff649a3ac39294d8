//! Events raised by a tick
//!
//! The simulation never plays sounds or spawns effects itself; it records
//! what happened and lets the shell react.

use serde::{Deserialize, Serialize};

/// Something worth reacting to that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground (or air-jumped)
    Jumped,
    /// Player fired a bullet
    ShotFired { bullet_id: u32 },
    /// Enemy entered its attack
    EnemyAttack { enemy_id: u32 },
    /// Enemy took damage and survived
    EnemyHit { enemy_id: u32 },
    /// Enemy's health reached zero
    EnemyKilled { enemy_id: u32 },
    /// Enemy's death clip finished and it was removed
    EnemyRemoved { enemy_id: u32 },
    /// Player took damage and survived
    PlayerHit,
    /// Player's health reached zero
    PlayerKilled,
}
