//! Game state and core simulation types
//!
//! The orchestrator in [`super::tick`] owns every collection here and
//! mutates them only during a single update pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Body, JumpState};
use super::anim::{
    AnimKey, AnimationLibrary, Animator, EnemyAnim, PlayerAnim, sprite_flipped,
};
use super::combat::{Bullet, Damageable, Team};
use super::events::GameEvent;
use super::health::{DamageOutcome, Vitals};
use super::level::Level;
use super::rect::Rect;
use super::tick::TickInput;
use crate::config::{EnemyProfile, SimulationConfig};
use crate::error::SimError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused; ticks do nothing but watch for unpause
    Paused,
    /// Player's death animation has finished
    GameOver,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Character {
    pub body: Body,
    pub anim: Animator<PlayerAnim>,
    pub vitals: Vitals,
    pub jump: JumpState,
    pub crouching: bool,
    /// A shot clip is playing
    pub shooting: bool,
    /// Seconds spent in the current hit reaction
    pub hit_time: f32,
}

impl Character {
    pub fn new(pos: Vec2, config: &SimulationConfig) -> Self {
        Self {
            body: Body::new(pos),
            anim: Animator::new(PlayerAnim::Idle),
            vitals: Vitals::new(config.max_health),
            jump: JumpState::default(),
            crouching: false,
            shooting: false,
            hit_time: 0.0,
        }
    }

    /// Turn this frame's intents into velocity and facing.
    ///
    /// Returns true if a jump started.
    pub fn apply_input(&mut self, input: &TickInput, config: &SimulationConfig) -> bool {
        self.crouching = input.crouch;

        let jumped = self.jump.press(input.jump, config.max_jumps);
        if jumped {
            self.body.vel.y = config.jump_speed;
        }

        let running = input.run_left || input.run_right;
        let speed = if running {
            config.run_speed
        } else {
            config.move_speed
        };
        if input.move_left || input.run_left {
            self.body.vel.x = -speed;
            self.body.facing_right = false;
        } else if input.move_right || input.run_right {
            self.body.vel.x = speed;
            self.body.facing_right = true;
        }

        if self.crouching {
            self.body.vel.x = 0.0;
        }
        jumped
    }

    /// Fire a bullet from the muzzle and start the shot clip.
    ///
    /// Returns `None` if a shot is already playing.
    pub fn shoot(&mut self, id: u32, config: &SimulationConfig) -> Option<Bullet> {
        if self.shooting {
            log::warn!("shoot requested while a shot is still playing");
            return None;
        }
        let offset = config.muzzle.offset(self.body.facing_right, self.crouching);
        self.shooting = true;
        self.anim.restart();
        Some(Bullet::new(
            id,
            self.body.pos + offset,
            self.body.facing_right,
            config.bullet_speed,
            Team::Player,
        ))
    }

    /// Count down the hit reaction; clears `is_hit` once `stun` has elapsed
    pub fn update_hit_reaction(&mut self, dt: f32, stun: f32) {
        if !self.vitals.is_hit {
            return;
        }
        self.hit_time += dt;
        if self.hit_time > stun {
            self.vitals.is_hit = false;
            self.hit_time = 0.0;
        }
    }

    pub fn view(&self) -> ActorView {
        ActorView::new(None, &self.body, self.anim.key.as_str(), &self.vitals)
    }
}

impl Damageable for Character {
    fn hurtbox(&self, config: &SimulationConfig) -> Rect {
        config
            .player_hurtbox
            .rect(self.body.pos, self.body.facing_right, config.sprite_scale)
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = self.vitals.apply_damage(amount);
        match outcome {
            DamageOutcome::Hit => self.hit_time = 0.0,
            DamageOutcome::Killed => {
                self.shooting = false;
                self.anim.restart();
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }
}

/// Enemy archetype, chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Zombie
    Ground,
    /// Bat
    Flying,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Ground => "ground",
            EnemyKind::Flying => "flying",
        }
    }

    /// Tuning profile for this archetype
    pub fn profile<'a>(&self, config: &'a SimulationConfig) -> &'a EnemyProfile {
        match self {
            EnemyKind::Ground => &config.ground_enemy,
            EnemyKind::Flying => &config.flying_enemy,
        }
    }
}

/// An enemy actor
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub anim: Animator<EnemyAnim>,
    pub vitals: Vitals,
    /// In the attack sub-state
    pub attacking: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, config: &SimulationConfig) -> Self {
        Self {
            id,
            kind,
            body: Body::new(pos),
            anim: Animator::new(EnemyAnim::Idle),
            vitals: Vitals::new(config.max_health),
            attacking: false,
        }
    }

    pub fn view(&self) -> ActorView {
        ActorView::new(Some(self.id), &self.body, self.anim.key.as_str(), &self.vitals)
    }
}

impl Damageable for Enemy {
    fn hurtbox(&self, config: &SimulationConfig) -> Rect {
        self.kind
            .profile(config)
            .hurtbox
            .rect(self.body.pos, self.body.facing_right, config.sprite_scale)
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = self.vitals.apply_damage(amount);
        if outcome != DamageOutcome::Ignored {
            // A hit interrupts any attack in progress
            self.attacking = false;
            self.anim.restart();
        }
        outcome
    }
}

/// Read-only snapshot of an actor for renderers, audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorView {
    /// Enemy id; `None` for the player
    pub id: Option<u32>,
    pub position: Vec2,
    /// Current animation key name
    pub anim: &'static str,
    pub facing_right: bool,
    /// Whether frames must be mirrored when drawn
    pub flipped: bool,
    pub health: i32,
    pub is_hit: bool,
    pub is_dead: bool,
}

impl ActorView {
    fn new(id: Option<u32>, body: &Body, anim: &'static str, vitals: &Vitals) -> Self {
        Self {
            id,
            position: body.pos,
            anim,
            facing_right: body.facing_right,
            flipped: sprite_flipped(body.facing_right),
            health: vitals.health,
            is_hit: vitals.is_hit,
            is_dead: vitals.is_dead,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimulationConfig,
    pub clips: AnimationLibrary,
    /// Static geometry; never mutated after construction
    pub level: Level,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Character,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live bullets, in spawn order
    pub bullets: Vec<Bullet>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Whether the pause intent was held on the previous tick
    pub pause_held_last_frame: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a simulation for `level`.
    ///
    /// Fails if the config is invalid or the library is missing a clip the
    /// state machines can request.
    pub fn new(
        config: SimulationConfig,
        clips: AnimationLibrary,
        level: Level,
    ) -> Result<Self, SimError> {
        config.validate()?;
        clips.validate(&config)?;

        let player = Character::new(level.player_spawn, &config);
        log::info!(
            "Simulation ready: {} colliders, world {}x{}",
            level.colliders().len(),
            level.width,
            level.height
        );
        Ok(Self {
            config,
            clips,
            level,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            pause_held_last_frame: false,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start the level over: fresh player at the spawn point, no bullets,
    /// and the platform enemies respawned. Entity IDs keep counting up.
    pub fn restart(&mut self) {
        self.player = Character::new(self.level.player_spawn, &self.config);
        self.enemies.clear();
        self.bullets.clear();
        self.events.clear();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.pause_held_last_frame = false;
        self.spawn_on_platforms();
        log::info!("Restarted with {} enemies", self.enemies.len());
    }

    /// Spawn an enemy at `pos`, returning its ID
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, &self.config));
        log::debug!("Spawned {} enemy {} at ({}, {})", kind.as_str(), id, pos.x, pos.y);
        id
    }

    /// One walker, then one flyer, on the top-left corner of every platform
    pub fn spawn_on_platforms(&mut self) {
        let spawns: Vec<Vec2> = self.level.platforms().iter().map(Level::spawn_point).collect();
        for &pos in &spawns {
            self.spawn_enemy(EnemyKind::Ground, pos);
        }
        for &pos in &spawns {
            self.spawn_enemy(EnemyKind::Flying, pos);
        }
    }

    /// Spawn a bullet owned by `owner`
    pub fn spawn_bullet(&mut self, pos: Vec2, facing_right: bool, owner: Team) -> u32 {
        let id = self.next_entity_id();
        let speed = self.config.bullet_speed;
        self.bullets.push(Bullet::new(id, pos, facing_right, speed, owner));
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn player_view(&self) -> ActorView {
        self.player.view()
    }

    pub fn enemy_views(&self) -> Vec<ActorView> {
        self.enemies.iter().map(Enemy::view).collect()
    }

    /// Take the events raised by the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::anim::ClipSet;

    fn state() -> GameState {
        GameState::new(
            SimulationConfig::default(),
            AnimationLibrary::standard(),
            Level::demo(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.vitals.health, 100);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_incomplete_library_is_rejected() {
        let mut clips = AnimationLibrary::standard();
        clips.player = ClipSet::new();
        let err = GameState::new(SimulationConfig::default(), clips, Level::demo()).unwrap_err();
        assert!(matches!(err, SimError::MissingClip { actor: "player", .. }));
    }

    #[test]
    fn test_nan_frame_cap_is_rejected() {
        let mut config = SimulationConfig::default();
        config.max_frame_dt = f32::NAN;
        let err = GameState::new(config, AnimationLibrary::standard(), Level::demo()).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_spawn_on_platforms() {
        let mut state = state();
        state.spawn_on_platforms();
        let platforms = state.level.platforms().len();
        assert_eq!(state.enemies.len(), platforms * 2);
        assert!(state.enemies[..platforms].iter().all(|e| e.kind == EnemyKind::Ground));
        assert!(state.enemies[platforms..].iter().all(|e| e.kind == EnemyKind::Flying));

        let first = state.level.platforms()[0];
        assert_eq!(state.enemies[0].body.pos, Vec2::new(first.x, first.top()));
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = state();
        state.spawn_on_platforms();
        let first_ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();

        state.player.body.pos = Vec2::new(5000.0, 0.0);
        state.player.take_damage(100);
        state.enemies.truncate(3);
        state.spawn_bullet(Vec2::new(10.0, 10.0), true, Team::Player);
        state.events.push(GameEvent::PlayerKilled);
        state.phase = GamePhase::GameOver;
        state.time_ticks = 500;

        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.body.pos, state.level.player_spawn);
        assert_eq!(state.player.vitals, Vitals::new(state.config.max_health));
        assert_eq!(state.player.jump.count, 0);
        assert!(state.bullets.is_empty());
        assert!(state.events.is_empty());
        assert_eq!(state.enemies.len(), state.level.platforms().len() * 2);
        assert!(state.enemies.iter().all(|e| e.vitals.health == state.config.max_health));
        // Respawned enemies get fresh IDs
        assert!(state.enemies.iter().all(|e| !first_ids.contains(&e.id)));
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = state();
        let a = state.spawn_enemy(EnemyKind::Ground, Vec2::ZERO);
        let b = state.spawn_bullet(Vec2::ZERO, true, Team::Player);
        assert_ne!(a, b);
    }

    #[test]
    fn test_shoot_spawns_from_muzzle() {
        let config = SimulationConfig::default();
        let mut player = Character::new(Vec2::new(100.0, 0.0), &config);
        player.body.facing_right = true;

        let bullet = player.shoot(1, &config).unwrap();
        assert_eq!(bullet.pos, Vec2::new(370.0, 149.5));
        assert_eq!(bullet.vel.x, config.bullet_speed);
        assert!(player.shooting);
        assert!(player.shoot(2, &config).is_none());
    }

    #[test]
    fn test_crouch_cancels_horizontal_motion() {
        let config = SimulationConfig::default();
        let mut player = Character::new(Vec2::ZERO, &config);
        let input = TickInput {
            run_right: true,
            crouch: true,
            ..Default::default()
        };
        player.apply_input(&input, &config);
        assert_eq!(player.body.vel.x, 0.0);
        assert!(player.body.facing_right);
    }

    #[test]
    fn test_player_hit_reaction_expires() {
        let config = SimulationConfig::default();
        let mut player = Character::new(Vec2::ZERO, &config);
        player.take_damage(25);
        assert!(player.vitals.is_hit);
        player.update_hit_reaction(0.5, config.player_hit_stun);
        assert!(player.vitals.is_hit);
        player.update_hit_reaction(0.5, config.player_hit_stun);
        assert!(!player.vitals.is_hit);
    }

    #[test]
    fn test_view_reports_flip() {
        let mut state = state();
        state.player.body.facing_right = true;
        let view = state.player_view();
        assert!(view.flipped);
        assert_eq!(view.anim, "IDLE");
        assert_eq!(view.id, None);
    }
}
