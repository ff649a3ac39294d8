//! Enemy pursuit and melee AI
//!
//! Every archetype runs the same protocol, parameterized by its
//! [`EnemyProfile`]: close the distance in a straight line, and once inside
//! the trigger radius stop and play the attack clip. Nothing persists between
//! frames besides the attack flag; the direction is re-derived every frame.

use glam::Vec2;

use super::state::Enemy;
use crate::config::{EnemyProfile, FacingConvention, Locomotion};

/// What an enemy decided this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitAction {
    /// Dead or reeling from a hit; no movement driven
    Stunned,
    /// Entered the attack sub-state this frame
    AttackStarted,
    /// Still inside the trigger radius, attack in progress
    Attacking,
    /// Moving toward the target
    Pursuing,
}

/// Run one frame of pursuit for `enemy` against a target at `target`.
///
/// `dt` is the frame step the caller will integrate with. A flyer picks its
/// facing from where this frame's move leaves it; a walker from where it
/// starts.
pub fn update_pursuit(
    enemy: &mut Enemy,
    profile: &EnemyProfile,
    target: Vec2,
    dt: f32,
) -> PursuitAction {
    if enemy.vitals.is_dead || enemy.vitals.is_hit {
        return PursuitAction::Stunned;
    }

    if enemy.body.distance_to(target) <= profile.trigger_radius {
        enemy.body.vel = Vec2::ZERO;
        if enemy.attacking {
            return PursuitAction::Attacking;
        }
        enemy.attacking = true;
        enemy.anim.restart();
        return PursuitAction::AttackStarted;
    }

    let target_is_right = match profile.locomotion {
        Locomotion::Ground => {
            let target_is_right = target.x > enemy.body.pos.x;
            enemy.body.vel.x = if target_is_right {
                profile.move_speed
            } else {
                -profile.move_speed
            };
            target_is_right
        }
        Locomotion::Air => {
            let direction = (target - enemy.body.pos).normalize_or_zero();
            enemy.body.vel = direction * profile.move_speed;
            target.x > enemy.body.pos.x + enemy.body.vel.x * dt
        }
    };
    enemy.body.facing_right = match profile.facing {
        FacingConvention::TowardTarget => target_is_right,
        FacingConvention::AwayFromTarget => !target_is_right,
    };
    PursuitAction::Pursuing
}
