//! Simulation tuning
//!
//! Every speed, radius and damage number the simulation reads lives in
//! [`SimulationConfig`], so tests and tools can vary them without touching
//! the entities. Loadable from JSON.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;

/// How a pursuing enemy moves toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Walks: only horizontal velocity is driven, gravity owns the vertical axis
    Ground,
    /// Flies: velocity points straight at the target
    Air,
}

/// Which way an enemy faces relative to its target.
///
/// Sprite sheets are authored facing different directions, so each archetype
/// keeps its own convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacingConvention {
    /// `facing_right` is true when the target is to the right
    TowardTarget,
    /// `facing_right` is true when the target is to the left
    AwayFromTarget,
}

/// Hurtbox geometry derived from an actor's sprite frame.
///
/// The box starts at the actor origin shifted right by a facing-dependent
/// offset, and is the scaled frame minus a trim on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HurtboxShape {
    /// Authored frame width (pixels, unscaled)
    pub frame_width: f32,
    /// Authored frame height (pixels, unscaled)
    pub frame_height: f32,
    /// X offset from the origin when facing right (scaled units)
    pub offset_facing_right: f32,
    /// X offset from the origin when facing left (scaled units)
    pub offset_facing_left: f32,
    /// Removed from the scaled width
    pub trim_width: f32,
    /// Removed from the scaled height
    pub trim_height: f32,
}

impl HurtboxShape {
    /// Agent sprite: 64x64, inset so the box hugs the visible body
    pub const AGENT: Self = Self {
        frame_width: 64.0,
        frame_height: 64.0,
        offset_facing_right: 100.0,
        offset_facing_left: 150.0,
        trim_width: 250.0,
        trim_height: 100.0,
    };

    /// Zombie sprite: 64x64
    pub const ZOMBIE: Self = Self {
        frame_width: 64.0,
        frame_height: 64.0,
        offset_facing_right: 100.0,
        offset_facing_left: 50.0,
        trim_width: 150.0,
        trim_height: 100.0,
    };

    /// Bat sprite: 40x42, box covers the whole frame
    pub const BAT: Self = Self {
        frame_width: 40.0,
        frame_height: 42.0,
        offset_facing_right: 0.0,
        offset_facing_left: 0.0,
        trim_width: 0.0,
        trim_height: 0.0,
    };

    /// Hurtbox for an actor at `origin`
    pub fn rect(&self, origin: Vec2, facing_right: bool, scale: f32) -> Rect {
        let offset = if facing_right {
            self.offset_facing_right
        } else {
            self.offset_facing_left
        };
        Rect::new(
            origin.x + offset,
            origin.y,
            (self.frame_width * scale - self.trim_width).max(0.0),
            (self.frame_height * scale - self.trim_height).max(0.0),
        )
    }
}

/// Where a fired bullet appears relative to the shooter's origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuzzleOffset {
    /// X offset when facing right
    pub facing_right_x: f32,
    /// X offset when facing left
    pub facing_left_x: f32,
    /// Y offset shared by all stances (half the unscaled frame height)
    pub base_y: f32,
    /// Extra Y offset while standing
    pub standing_y: f32,
    /// Extra Y offset while crouching
    pub crouching_y: f32,
}

impl Default for MuzzleOffset {
    fn default() -> Self {
        Self {
            facing_right_x: 64.0 * SPRITE_SCALE - 50.0,
            facing_left_x: -64.0 * SPRITE_SCALE + 275.0,
            base_y: 32.0,
            standing_y: 117.5,
            crouching_y: 50.0,
        }
    }
}

impl MuzzleOffset {
    /// Offset from the shooter's origin for the given facing and stance
    pub fn offset(&self, facing_right: bool, crouching: bool) -> Vec2 {
        let x = if facing_right {
            self.facing_right_x
        } else {
            self.facing_left_x
        };
        let stance = if crouching {
            self.crouching_y
        } else {
            self.standing_y
        };
        Vec2::new(x, self.base_y + stance)
    }
}

/// Tuning for one enemy archetype's pursuit/attack behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Pursuit speed (units/s)
    pub move_speed: f32,
    /// Distance at which the enemy stops and attacks
    pub trigger_radius: f32,
    /// Vertical acceleration for this archetype
    pub gravity: f32,
    pub locomotion: Locomotion,
    pub facing: FacingConvention,
    pub hurtbox: HurtboxShape,
}

impl EnemyProfile {
    /// Zombie: walks, attacks within 100 units
    pub fn ground_walker() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            trigger_radius: 100.0,
            gravity: GRAVITY,
            locomotion: Locomotion::Ground,
            facing: FacingConvention::TowardTarget,
            hurtbox: HurtboxShape::ZOMBIE,
        }
    }

    /// Bat: flies straight at the player, attacks within 50 units
    pub fn flyer() -> Self {
        Self {
            move_speed: 150.0,
            trigger_radius: 50.0,
            gravity: -500.0,
            locomotion: Locomotion::Air,
            facing: FacingConvention::AwayFromTarget,
            hurtbox: HurtboxShape::BAT,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !is_positive(self.move_speed) {
            return Err(invalid(field, "move_speed must be positive"));
        }
        if !is_positive(self.trigger_radius) {
            return Err(invalid(field, "trigger_radius must be positive"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid(field, "gravity must be finite"));
        }
        Ok(())
    }
}

/// All simulation tuning, passed explicitly into the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Player physics ===
    /// Vertical acceleration applied to the player every frame
    pub gravity: f32,
    /// Vertical speed set (not added) by a jump
    pub jump_speed: f32,
    /// Walking speed
    pub move_speed: f32,
    /// Running speed
    pub run_speed: f32,
    /// Jumps allowed before landing
    pub max_jumps: u32,

    // === Actors ===
    /// Starting health for every actor
    pub max_health: i32,
    /// Scale applied to authored sprite frame sizes
    pub sprite_scale: f32,
    pub player_hurtbox: HurtboxShape,
    /// Seconds the player stays in hit reaction after being struck
    pub player_hit_stun: f32,

    // === Combat ===
    pub bullet_speed: f32,
    /// Bullet collision size (width, height)
    pub bullet_size: Vec2,
    pub bullet_damage: i32,
    /// Damage dealt by an attacking enemy on contact
    pub melee_damage: i32,
    pub muzzle: MuzzleOffset,

    // === Enemies ===
    pub ground_enemy: EnemyProfile,
    pub flying_enemy: EnemyProfile,

    // === Frame stepping ===
    /// Largest frame delta accepted by a single step
    pub max_frame_dt: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            move_speed: MOVE_SPEED,
            run_speed: RUN_SPEED,
            max_jumps: MAX_JUMPS,

            max_health: MAX_HEALTH,
            sprite_scale: SPRITE_SCALE,
            player_hurtbox: HurtboxShape::AGENT,
            player_hit_stun: 9.0 * FRAME_DURATION,

            bullet_speed: BULLET_SPEED,
            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet_damage: BULLET_DAMAGE,
            melee_damage: BULLET_DAMAGE,
            muzzle: MuzzleOffset::default(),

            ground_enemy: EnemyProfile::ground_walker(),
            flying_enemy: EnemyProfile::flyer(),

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON (missing fields take their defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_jumps == 0 {
            return Err(invalid("max_jumps", "at least one jump is required"));
        }
        if !is_positive(self.move_speed) {
            return Err(invalid("move_speed", "must be positive"));
        }
        if !(self.run_speed.is_finite() && self.run_speed >= self.move_speed) {
            return Err(invalid("run_speed", "must be finite and at least move_speed"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", "must be finite"));
        }
        if !self.jump_speed.is_finite() {
            return Err(invalid("jump_speed", "must be finite"));
        }
        if self.max_health <= 0 {
            return Err(invalid("max_health", "must be positive"));
        }
        if self.bullet_damage < 0 || self.melee_damage < 0 {
            return Err(invalid("bullet_damage", "damage cannot be negative"));
        }
        if !is_positive(self.sprite_scale) {
            return Err(invalid("sprite_scale", "must be positive"));
        }
        if !(self.player_hit_stun.is_finite() && self.player_hit_stun >= 0.0) {
            return Err(invalid("player_hit_stun", "must be finite and non-negative"));
        }
        if !is_positive(self.bullet_speed) {
            return Err(invalid("bullet_speed", "must be positive"));
        }
        if !(is_positive(self.bullet_size.x) && is_positive(self.bullet_size.y)) {
            return Err(invalid("bullet_size", "both sides must be positive"));
        }
        if !is_positive(self.max_frame_dt) {
            return Err(invalid("max_frame_dt", "must be positive"));
        }
        self.ground_enemy.validate("ground_enemy")?;
        self.flying_enemy.validate("flying_enemy")?;
        Ok(())
    }
}

/// Finite and strictly greater than zero; false for NaN
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
