//! Collision resolution against static level geometry
//!
//! Landing-only: an actor falling onto the top of a collider is snapped onto
//! it. Walls and ceilings are not resolved, so actors pass through colliders
//! sideways and from below.

use super::actor::Body;
use super::rect::Rect;

/// Resolve landings for one actor against every static collider.
///
/// `hurtbox` is the actor's hurtbox at the start of resolution. A collider
/// lands the actor when the hurtbox overlaps it, the actor is falling, and the
/// actor's vertical midpoint is at or above the collider's top edge.
///
/// Colliders are checked in list order. Resolution only ever raises the actor
/// and zeroes its fall, so later colliders cannot undo an earlier landing.
/// Returns true if the actor landed on any collider.
pub fn resolve_landing(body: &mut Body, hurtbox: &Rect, colliders: &[Rect]) -> bool {
    let mut landed = false;
    for collider in colliders {
        if !hurtbox.overlaps(collider) {
            continue;
        }
        let midpoint = body.pos.y + hurtbox.height / 2.0;
        if body.vel.y < 0.0 && midpoint >= collider.top() {
            body.pos.y = collider.top();
            body.vel.y = 0.0;
            landed = true;
        }
    }
    landed
}

/// Landing against colliders, then the ground plane.
///
/// Returns true if the actor landed on either.
pub fn resolve_static(body: &mut Body, hurtbox: &Rect, colliders: &[Rect]) -> bool {
    let on_collider = resolve_landing(body, hurtbox, colliders);
    let on_ground = body.clamp_to_ground();
    on_collider || on_ground
}
