//! Kinematic actor state shared by the player and every enemy
//!
//! Horizontal velocity is a per-frame impulse: it is re-derived from input or
//! AI every frame and cleared by [`Body::end_frame`]. Vertical velocity
//! persists across frames for gravity and jumps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and facing of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// World-space origin of the sprite's bounding box
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub facing_right: bool,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing_right: false,
        }
    }

    /// Accelerate downward, then clamp to the ground plane.
    ///
    /// Returns true when the actor was below ground and has landed.
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) -> bool {
        self.vel.y += gravity * dt;
        self.clamp_to_ground()
    }

    /// `pos += vel * dt`
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Snap an actor that sank below y = 0 back onto the ground
    pub fn clamp_to_ground(&mut self) -> bool {
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
            true
        } else {
            false
        }
    }

    /// Drop the horizontal impulse at the end of the frame
    #[inline]
    pub fn end_frame(&mut self) {
        self.vel.x = 0.0;
    }

    /// Straight-line distance between two origins
    pub fn distance_to(&self, target: Vec2) -> f32 {
        self.pos.distance(target)
    }
}

/// Double-jump bookkeeping with rising-edge detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpState {
    /// Jumps used since last landing
    pub count: u32,
    /// Whether the jump intent was held on the previous frame
    pub held_last_frame: bool,
}

impl JumpState {
    /// Feed this frame's jump intent.
    ///
    /// Returns true if a jump starts: the intent just went down and jumps remain.
    pub fn press(&mut self, pressed: bool, max_jumps: u32) -> bool {
        let rising_edge = pressed && !self.held_last_frame;
        self.held_last_frame = pressed;
        if rising_edge && self.count < max_jumps {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Landing restores every jump
    #[inline]
    pub fn land(&mut self) {
        self.count = 0;
    }
}
