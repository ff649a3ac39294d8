//! Projectiles and damage resolution
//!
//! Bullets fly strictly horizontally at a constant speed and are culled once
//! they leave the level's horizontal extent. A bullet damages at most one
//! target and is consumed by the hit. Enemies fight in melee: an attacking
//! enemy touching the player strikes it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::health::{DamageOutcome, Vitals};
use super::rect::Rect;
use super::state::{Character, Enemy};
use crate::config::SimulationConfig;

/// Side a bullet was fired by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Anything bullets and melee can hurt
pub trait Damageable {
    /// Collision rectangle for the current frame
    fn hurtbox(&self, config: &SimulationConfig) -> Rect;

    fn vitals(&self) -> &Vitals;

    /// Apply damage and update the actor's own reaction state
    fn take_damage(&mut self, amount: i32) -> DamageOutcome;
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Constant for the bullet's lifetime
    pub vel: Vec2,
    pub owner: Team,
}

impl Bullet {
    /// Bullet travelling the way its shooter faces
    pub fn new(id: u32, pos: Vec2, facing_right: bool, speed: f32, owner: Team) -> Self {
        let vx = if facing_right { speed } else { -speed };
        Self {
            id,
            pos,
            vel: Vec2::new(vx, 0.0),
            owner,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Collision rectangle
    pub fn rect(&self, size: Vec2) -> Rect {
        Rect::at(self.pos, size)
    }

    /// Whether the bullet is still within `[0, world_width]` horizontally
    #[inline]
    pub fn in_bounds(&self, world_width: f32) -> bool {
        (0.0..=world_width).contains(&self.pos.x)
    }
}

/// Move every bullet, then drop the ones that left the level.
///
/// Returns how many were culled.
pub fn advance_bullets(bullets: &mut Vec<Bullet>, dt: f32, world_width: f32) -> usize {
    for bullet in bullets.iter_mut() {
        bullet.advance(dt);
    }
    let before = bullets.len();
    bullets.retain(|b| b.in_bounds(world_width));
    before - bullets.len()
}

/// A bullet that connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet_id: u32,
    /// Index of the target in the slice passed in
    pub target: usize,
    pub outcome: DamageOutcome,
}

/// Resolve `shooter`'s bullets against `targets`.
///
/// Each bullet hits the first living target it overlaps, in slice order, and
/// is removed. Bullets of other teams are left alone. A target killed by an
/// earlier bullet this frame is no longer hittable.
pub fn resolve_bullet_hits<T: Damageable>(
    bullets: &mut Vec<Bullet>,
    shooter: Team,
    targets: &mut [T],
    config: &SimulationConfig,
) -> Vec<BulletHit> {
    let mut hits = Vec::new();
    bullets.retain(|bullet| {
        if bullet.owner != shooter {
            return true;
        }
        let rect = bullet.rect(config.bullet_size);
        let target = targets
            .iter()
            .position(|t| t.vitals().is_alive() && t.hurtbox(config).overlaps(&rect));
        let Some(target) = target else {
            return true;
        };
        let outcome = targets[target].take_damage(config.bullet_damage);
        hits.push(BulletHit {
            bullet_id: bullet.id,
            target,
            outcome,
        });
        false
    });
    hits
}

/// Strike the player with every attacking enemy touching it.
///
/// A player already in hit reaction cannot be struck again until it ends.
/// Returns the index of each enemy that landed a blow.
pub fn resolve_melee(
    player: &mut Character,
    enemies: &[Enemy],
    config: &SimulationConfig,
) -> Vec<(usize, DamageOutcome)> {
    let mut strikes = Vec::new();
    for (idx, enemy) in enemies.iter().enumerate() {
        if !player.vitals.is_alive() || player.vitals.is_hit {
            break;
        }
        if !enemy.attacking || !enemy.vitals.is_alive() {
            continue;
        }
        if enemy.hurtbox(config).overlaps(&player.hurtbox(config)) {
            let outcome = player.take_damage(config.melee_damage);
            strikes.push((idx, outcome));
        }
    }
    strikes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    fn zombie_at(id: u32, pos: Vec2, config: &SimulationConfig) -> Enemy {
        Enemy::new(id, EnemyKind::Ground, pos, config)
    }

    /// Bullet placed inside the hurtbox of a zombie at `pos` facing left
    fn bullet_on(id: u32, pos: Vec2) -> Bullet {
        Bullet::new(id, pos + Vec2::new(60.0, 50.0), true, 100.0, Team::Player)
    }

    #[test]
    fn test_bullet_direction_follows_facing() {
        let right = Bullet::new(1, Vec2::ZERO, true, 100.0, Team::Player);
        let left = Bullet::new(2, Vec2::ZERO, false, 100.0, Team::Player);
        assert_eq!(right.vel, Vec2::new(100.0, 0.0));
        assert_eq!(left.vel, Vec2::new(-100.0, 0.0));
    }

    #[test]
    fn test_bullets_culled_outside_world() {
        let mut bullets = vec![
            Bullet::new(1, Vec2::new(5.0, 10.0), false, 100.0, Team::Player),
            Bullet::new(2, Vec2::new(500.0, 10.0), true, 100.0, Team::Player),
            Bullet::new(3, Vec2::new(995.0, 10.0), true, 100.0, Team::Player),
        ];
        let culled = advance_bullets(&mut bullets, 0.1, 1000.0);
        assert_eq!(culled, 2);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].id, 2);
        assert_eq!(bullets[0].pos.x, 510.0);
    }

    #[test]
    fn test_bullet_hit_damages_and_consumes() {
        let config = config();
        let pos = Vec2::new(1000.0, 0.0);
        let mut enemies = vec![zombie_at(1, pos, &config)];
        let mut bullets = vec![bullet_on(7, pos)];

        let hits = resolve_bullet_hits(&mut bullets, Team::Player, &mut enemies, &config);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bullet_id, 7);
        assert_eq!(hits[0].outcome, DamageOutcome::Hit);
        assert!(bullets.is_empty());
        assert_eq!(enemies[0].vitals.health, 75);
        assert!(enemies[0].vitals.is_hit);
    }

    #[test]
    fn test_bullet_hits_at_most_one_target() {
        let config = config();
        let pos = Vec2::new(1000.0, 0.0);
        // Two zombies stacked on the same spot
        let mut enemies = vec![zombie_at(1, pos, &config), zombie_at(2, pos, &config)];
        let mut bullets = vec![bullet_on(7, pos)];

        let hits = resolve_bullet_hits(&mut bullets, Team::Player, &mut enemies, &config);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, 0);
        assert_eq!(enemies[0].vitals.health, 75);
        assert_eq!(enemies[1].vitals.health, 100);
    }

    #[test]
    fn test_dead_targets_are_skipped() {
        let config = config();
        let pos = Vec2::new(1000.0, 0.0);
        let mut enemies = vec![zombie_at(1, pos, &config), zombie_at(2, pos, &config)];
        enemies[0].vitals.apply_damage(100);
        let mut bullets = vec![bullet_on(7, pos)];

        let hits = resolve_bullet_hits(&mut bullets, Team::Player, &mut enemies, &config);
        assert_eq!(hits[0].target, 1);
        assert_eq!(enemies[1].vitals.health, 75);
    }

    #[test]
    fn test_other_team_bullets_ignored() {
        let config = config();
        let pos = Vec2::new(1000.0, 0.0);
        let mut enemies = vec![zombie_at(1, pos, &config)];
        let mut bullets = vec![Bullet::new(7, pos + Vec2::new(60.0, 50.0), true, 100.0, Team::Enemy)];

        let hits = resolve_bullet_hits(&mut bullets, Team::Player, &mut enemies, &config);
        assert!(hits.is_empty());
        assert_eq!(bullets.len(), 1);
        assert_eq!(enemies[0].vitals.health, 100);
    }

    #[test]
    fn test_melee_requires_attack_and_contact() {
        let config = config();
        let mut player = Character::new(Vec2::new(100.0, 0.0), &config);
        let mut enemies = vec![zombie_at(1, Vec2::new(120.0, 0.0), &config)];

        assert!(resolve_melee(&mut player, &enemies, &config).is_empty());

        enemies[0].attacking = true;
        let strikes = resolve_melee(&mut player, &enemies, &config);
        assert_eq!(strikes, vec![(0, DamageOutcome::Hit)]);
        assert_eq!(player.vitals.health, 100 - config.melee_damage);

        // Still in hit reaction: no second strike
        assert!(resolve_melee(&mut player, &enemies, &config).is_empty());
    }
}
