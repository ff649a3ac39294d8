//! Fixed timestep simulation tick
//!
//! Advances the whole world by one frame in a fixed order: player input,
//! player physics, enemy AI and physics, bullets, damage, animation, then
//! removal of finished enemies. The player always resolves before enemies
//! read its position, and damage always lands before animation is chosen,
//! so a lethal hit shows in the same frame.

use std::slice;

use serde::{Deserialize, Serialize};

use super::ai::{PursuitAction, update_pursuit};
use super::anim::{update_enemy, update_player};
use super::collision::resolve_static;
use super::combat::{Damageable, Team, advance_bullets, resolve_bullet_hits, resolve_melee};
use super::events::GameEvent;
use super::health::DamageOutcome;
use super::state::{EnemyKind, GamePhase, GameState};

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Move left at run speed
    pub run_left: bool,
    /// Move right at run speed
    pub run_right: bool,
    /// Held state; only the rising edge jumps
    pub jump: bool,
    /// Fire
    pub attack: bool,
    pub crouch: bool,
    /// Held state; only the rising edge toggles pause
    pub pause: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    let pause_pressed = input.pause && !state.pause_held_last_frame;
    state.pause_held_last_frame = input.pause;
    if pause_pressed {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.config.max_frame_dt)
    } else {
        log::warn!("Ignoring non-finite frame delta {}", dt);
        0.0
    };
    state.time_ticks += 1;

    update_player_input(state, input, dt);
    update_player_physics(state, dt);
    update_enemies(state, dt);

    let culled = advance_bullets(&mut state.bullets, dt, state.level.width);
    if culled > 0 {
        log::trace!("Culled {} bullets", culled);
    }

    resolve_damage(state);
    update_animation(state);
    remove_disposable(state);
}

/// Step 1: timers, gravity and intents for the player
fn update_player_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.anim.advance(dt);
    player.update_hit_reaction(dt, state.config.player_hit_stun);

    if player.body.apply_gravity(state.config.gravity, dt) {
        player.jump.land();
    }

    if !player.vitals.is_alive() {
        return;
    }

    if player.apply_input(input, &state.config) {
        state.events.push(GameEvent::Jumped);
    }

    if input.attack && !state.player.shooting {
        let id = state.next_entity_id();
        if let Some(bullet) = state.player.shoot(id, &state.config) {
            state.events.push(GameEvent::ShotFired { bullet_id: id });
            state.bullets.push(bullet);
        }
    }
}

/// Step 2: integrate and land the player
fn update_player_physics(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    player.body.integrate(dt);
    let hurtbox = player.hurtbox(&state.config);
    if resolve_static(&mut player.body, &hurtbox, state.level.colliders()) {
        player.jump.land();
    }
}

/// Step 3: pursuit, gravity and landing for every enemy, in spawn order
fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.body.pos;
    for enemy in state.enemies.iter_mut() {
        let profile = enemy.kind.profile(&state.config);
        enemy.anim.advance(dt);
        enemy.body.apply_gravity(profile.gravity, dt);

        if update_pursuit(enemy, profile, target, dt) == PursuitAction::AttackStarted {
            state.events.push(GameEvent::EnemyAttack { enemy_id: enemy.id });
        }

        enemy.body.integrate(dt);
        let hurtbox = enemy.hurtbox(&state.config);
        resolve_static(&mut enemy.body, &hurtbox, state.level.colliders());
    }
}

/// Step 5: bullets against enemies and the player, then melee
fn resolve_damage(state: &mut GameState) {
    let hits = resolve_bullet_hits(
        &mut state.bullets,
        Team::Player,
        &mut state.enemies,
        &state.config,
    );
    for hit in hits {
        let enemy_id = state.enemies[hit.target].id;
        match hit.outcome {
            DamageOutcome::Hit => state.events.push(GameEvent::EnemyHit { enemy_id }),
            DamageOutcome::Killed => {
                log::debug!("Enemy {} killed by bullet {}", enemy_id, hit.bullet_id);
                state.events.push(GameEvent::EnemyKilled { enemy_id });
            }
            DamageOutcome::Ignored => {}
        }
    }

    let hits = resolve_bullet_hits(
        &mut state.bullets,
        Team::Enemy,
        slice::from_mut(&mut state.player),
        &state.config,
    );
    let mut outcomes: Vec<DamageOutcome> = hits.iter().map(|h| h.outcome).collect();
    outcomes.extend(
        resolve_melee(&mut state.player, &state.enemies, &state.config)
            .into_iter()
            .map(|(_, outcome)| outcome),
    );
    for outcome in outcomes {
        match outcome {
            DamageOutcome::Hit => state.events.push(GameEvent::PlayerHit),
            DamageOutcome::Killed => {
                log::info!("Player killed at tick {}", state.time_ticks);
                state.events.push(GameEvent::PlayerKilled);
            }
            DamageOutcome::Ignored => {}
        }
    }
}

/// Step 6: pick every actor's animation, then drop horizontal impulses
fn update_animation(state: &mut GameState) {
    let player = &mut state.player;
    update_player(
        &mut player.anim,
        &state.clips.player,
        &mut player.vitals,
        &mut player.shooting,
        player.body.vel,
        player.crouching,
        state.config.move_speed,
    );
    player.body.end_frame();

    for enemy in state.enemies.iter_mut() {
        let clips = match enemy.kind {
            EnemyKind::Ground => &state.clips.ground_enemy,
            EnemyKind::Flying => &state.clips.flying_enemy,
        };
        let locomotion = enemy.kind.profile(&state.config).locomotion;
        update_enemy(
            &mut enemy.anim,
            clips,
            &mut enemy.vitals,
            &mut enemy.attacking,
            enemy.body.vel,
            locomotion,
        );
        enemy.body.end_frame();
    }
}

/// Step 7: compact out enemies whose death clip has finished
fn remove_disposable(state: &mut GameState) {
    let events = &mut state.events;
    state.enemies.retain(|enemy| {
        if !enemy.vitals.is_disposable {
            return true;
        }
        log::debug!("Removing enemy {}", enemy.id);
        events.push(GameEvent::EnemyRemoved { enemy_id: enemy.id });
        false
    });

    if state.player.vitals.is_disposable {
        log::info!("Game over at tick {}", state.time_ticks);
        state.phase = GamePhase::GameOver;
    }
}
