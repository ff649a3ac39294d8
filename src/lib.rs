//! Slug Sim - 2D side-scrolling action-platformer simulation
//!
//! Core modules:
//! - `sim`: Per-frame gameplay (physics, collisions, animation state, combat, AI)
//! - `config`: Data-driven tuning (speeds, gravity, enemy profiles)
//! - `error`: Startup/configuration errors
//!
//! Rendering, audio, input mapping and tile-map parsing live outside this
//! crate. They feed intents in through [`sim::TickInput`] and read results
//! back through [`sim::ActorView`] and [`sim::GameEvent`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{EnemyProfile, HurtboxShape, SimulationConfig};
pub use error::{ConfigError, SimError};

/// Game configuration constants
pub mod consts {
    /// Frame step used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted by a single step (hitch protection)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Vertical acceleration (units/s², negative is down)
    pub const GRAVITY: f32 = -1000.0;
    /// Vertical speed set by a jump
    pub const JUMP_SPEED: f32 = 1000.0;
    /// Walking speed
    pub const MOVE_SPEED: f32 = 100.0;
    /// Running speed
    pub const RUN_SPEED: f32 = 300.0;
    /// Jumps allowed before landing (ground jump + one air jump)
    pub const MAX_JUMPS: u32 = 2;

    /// Sprite scale factor applied to authored frame sizes
    pub const SPRITE_SCALE: f32 = 5.0;
    /// Seconds per authored animation frame
    pub const FRAME_DURATION: f32 = 0.1;

    /// Starting (and maximum) health for every actor
    pub const MAX_HEALTH: i32 = 100;
    /// Damage applied by one bullet
    pub const BULLET_DAMAGE: i32 = 25;
    /// Bullet speed (units/s)
    pub const BULLET_SPEED: f32 = 100.0;
    /// Bullet collision size (unscaled)
    pub const BULLET_WIDTH: f32 = 16.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
}
