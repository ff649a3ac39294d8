//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod ai;
pub mod anim;
pub mod collision;
pub mod combat;
pub mod events;
pub mod health;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::{Body, JumpState};
pub use ai::{PursuitAction, update_pursuit};
pub use anim::{
    AnimKey, AnimationLibrary, Animator, Clip, ClipSet, EnemyAnim, PlayerAnim, sprite_flipped,
};
pub use collision::{resolve_landing, resolve_static};
pub use combat::{Bullet, Damageable, Team};
pub use events::GameEvent;
pub use health::{DamageOutcome, Vitals};
pub use level::Level;
pub use rect::Rect;
pub use state::{ActorView, Character, Enemy, EnemyKind, GamePhase, GameState};
pub use tick::{TickInput, tick};
