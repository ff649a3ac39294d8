//! Animation state machines
//!
//! Each frame an actor's physics and combat flags are reduced to one
//! animation key by fixed-priority rules. Clip timing is the only place
//! state escapes by time instead of input: hit reactions, shots, attacks and
//! deaths end when their clip's authored length has elapsed.
//!
//! Clips are opaque here. The core only needs each clip's duration and
//! whether it loops; pixels and sprite sheets belong to the renderer.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::health::Vitals;
use crate::config::{Locomotion, SimulationConfig};
use crate::consts::FRAME_DURATION;
use crate::error::SimError;

/// A named animation key belonging to one kind of actor
pub trait AnimKey: Copy + Eq + Hash + Debug + 'static {
    /// Actor kind, for error messages
    const ACTOR: &'static str;

    /// Stable name handed to renderers
    fn as_str(&self) -> &'static str;
}

/// Player (agent) animation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    CrouchIdle,
    StandShoot,
    WalkShoot,
    RunShoot,
    JumpShoot,
    FallShoot,
    CrouchShoot,
    Death,
}

impl PlayerAnim {
    pub const ALL: [PlayerAnim; 13] = [
        PlayerAnim::Idle,
        PlayerAnim::Walk,
        PlayerAnim::Run,
        PlayerAnim::Jump,
        PlayerAnim::Fall,
        PlayerAnim::CrouchIdle,
        PlayerAnim::StandShoot,
        PlayerAnim::WalkShoot,
        PlayerAnim::RunShoot,
        PlayerAnim::JumpShoot,
        PlayerAnim::FallShoot,
        PlayerAnim::CrouchShoot,
        PlayerAnim::Death,
    ];
}

impl AnimKey for PlayerAnim {
    const ACTOR: &'static str = "player";

    fn as_str(&self) -> &'static str {
        match self {
            PlayerAnim::Idle => "IDLE",
            PlayerAnim::Walk => "WALK",
            PlayerAnim::Run => "RUN",
            PlayerAnim::Jump => "JUMP",
            PlayerAnim::Fall => "FALL",
            PlayerAnim::CrouchIdle => "CROUCH_IDLE",
            PlayerAnim::StandShoot => "STAND_SHOOT",
            PlayerAnim::WalkShoot => "WALK_SHOOT",
            PlayerAnim::RunShoot => "RUN_SHOOT",
            PlayerAnim::JumpShoot => "JUMP_SHOOT",
            PlayerAnim::FallShoot => "FALL_SHOOT",
            PlayerAnim::CrouchShoot => "CROUCH_SHOOT",
            PlayerAnim::Death => "DEATH",
        }
    }
}

/// Enemy animation keys, shared by every archetype.
///
/// Each archetype's clip set maps these onto its own sheet (a flyer's `Walk`
/// is its horizontal flap, its `Fly` the vertical one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyAnim {
    Idle,
    Walk,
    Fly,
    Attack,
    WalkAttack,
    Hit,
    Death,
}

impl EnemyAnim {
    /// Keys the state machine can request for an archetype moving this way
    pub fn required(locomotion: Locomotion) -> &'static [EnemyAnim] {
        match locomotion {
            Locomotion::Ground => &[
                EnemyAnim::Idle,
                EnemyAnim::Walk,
                EnemyAnim::Attack,
                EnemyAnim::WalkAttack,
                EnemyAnim::Hit,
                EnemyAnim::Death,
            ],
            Locomotion::Air => &[
                EnemyAnim::Idle,
                EnemyAnim::Walk,
                EnemyAnim::Fly,
                EnemyAnim::Attack,
                EnemyAnim::Hit,
                EnemyAnim::Death,
            ],
        }
    }
}

impl AnimKey for EnemyAnim {
    const ACTOR: &'static str = "enemy";

    fn as_str(&self) -> &'static str {
        match self {
            EnemyAnim::Idle => "IDLE",
            EnemyAnim::Walk => "WALK",
            EnemyAnim::Fly => "FLY",
            EnemyAnim::Attack => "ATTACK",
            EnemyAnim::WalkAttack => "WALK_ATTACK",
            EnemyAnim::Hit => "HIT",
            EnemyAnim::Death => "DEATH",
        }
    }
}

/// Timing of one authored clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub frames: u32,
    /// Seconds per frame
    pub frame_duration: f32,
    pub looping: bool,
}

impl Clip {
    /// Looping clip at the standard frame rate
    pub const fn looping(frames: u32) -> Self {
        Self {
            frames,
            frame_duration: FRAME_DURATION,
            looping: true,
        }
    }

    /// Play-once clip at the standard frame rate
    pub const fn once(frames: u32) -> Self {
        Self {
            frames,
            frame_duration: FRAME_DURATION,
            looping: false,
        }
    }

    /// Authored length in seconds
    #[inline]
    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_duration
    }

    /// True once a play-once clip has shown its last frame.
    ///
    /// Looping clips never finish.
    pub fn is_finished(&self, state_time: f32) -> bool {
        if self.looping {
            return false;
        }
        let frame = (state_time / self.frame_duration) as u32;
        frame >= self.frames
    }
}

/// Clips for one actor kind, keyed by animation
#[derive(Debug, Clone)]
pub struct ClipSet<K: AnimKey> {
    clips: HashMap<K, Clip>,
}

impl<K: AnimKey> Default for ClipSet<K> {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }
}

impl<K: AnimKey> ClipSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: K, clip: Clip) -> Self {
        self.clips.insert(key, clip);
        self
    }

    pub fn get(&self, key: K) -> Option<&Clip> {
        self.clips.get(&key)
    }

    /// Whether the clip for `key` has finished at `state_time`
    pub fn is_finished(&self, key: K, state_time: f32) -> bool {
        self.get(key)
            .is_some_and(|clip| clip.is_finished(state_time))
    }

    /// Fail if any of `keys` has no clip
    pub fn require(&self, keys: &[K]) -> Result<(), SimError> {
        match keys.iter().find(|&&key| !self.clips.contains_key(&key)) {
            Some(key) => Err(SimError::MissingClip {
                actor: K::ACTOR,
                key: key.as_str(),
            }),
            None => Ok(()),
        }
    }
}

/// Every clip set the simulation needs
#[derive(Debug, Clone)]
pub struct AnimationLibrary {
    pub player: ClipSet<PlayerAnim>,
    pub ground_enemy: ClipSet<EnemyAnim>,
    pub flying_enemy: ClipSet<EnemyAnim>,
}

impl AnimationLibrary {
    /// Clip timings of the stock agent, zombie and bat sheets
    pub fn standard() -> Self {
        let player = ClipSet::new()
            .with(PlayerAnim::Idle, Clip::looping(5))
            .with(PlayerAnim::Walk, Clip::looping(8))
            .with(PlayerAnim::Run, Clip::looping(8))
            .with(PlayerAnim::Jump, Clip::looping(5))
            .with(PlayerAnim::Fall, Clip::looping(5))
            .with(PlayerAnim::CrouchIdle, Clip::looping(5))
            .with(PlayerAnim::StandShoot, Clip::once(5))
            .with(PlayerAnim::WalkShoot, Clip::once(8))
            .with(PlayerAnim::RunShoot, Clip::once(8))
            .with(PlayerAnim::JumpShoot, Clip::once(5))
            .with(PlayerAnim::FallShoot, Clip::once(5))
            .with(PlayerAnim::CrouchShoot, Clip::once(5))
            .with(PlayerAnim::Death, Clip::once(12));

        let ground_enemy = ClipSet::new()
            .with(EnemyAnim::Idle, Clip::looping(7))
            .with(EnemyAnim::Walk, Clip::looping(8))
            .with(EnemyAnim::Attack, Clip::once(6))
            .with(EnemyAnim::WalkAttack, Clip::once(8))
            .with(EnemyAnim::Hit, Clip::once(3))
            .with(EnemyAnim::Death, Clip::once(14));

        let flying_enemy = ClipSet::new()
            .with(EnemyAnim::Idle, Clip::looping(16))
            .with(EnemyAnim::Walk, Clip::looping(12))
            .with(EnemyAnim::Fly, Clip::looping(7))
            .with(EnemyAnim::Attack, Clip::once(9))
            .with(EnemyAnim::Hit, Clip::once(3))
            .with(EnemyAnim::Death, Clip::once(6));

        Self {
            player,
            ground_enemy,
            flying_enemy,
        }
    }

    /// Check that every key the state machines can request has a clip
    pub fn validate(&self, config: &SimulationConfig) -> Result<(), SimError> {
        self.player.require(&PlayerAnim::ALL)?;
        self.ground_enemy
            .require(EnemyAnim::required(config.ground_enemy.locomotion))?;
        self.flying_enemy
            .require(EnemyAnim::required(config.flying_enemy.locomotion))?;
        Ok(())
    }
}

/// Current animation key and time spent in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animator<K> {
    pub key: K,
    /// Seconds since the key was entered (or last restarted)
    pub state_time: f32,
}

impl<K: AnimKey> Animator<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            state_time: 0.0,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Switch key; time restarts only on an actual change
    pub fn set(&mut self, key: K) {
        if self.key != key {
            self.key = key;
            self.state_time = 0.0;
        }
    }

    /// Restart the current clip
    #[inline]
    pub fn restart(&mut self) {
        self.state_time = 0.0;
    }

    /// Whether the current clip has finished
    pub fn is_finished(&self, clips: &ClipSet<K>) -> bool {
        clips.is_finished(self.key, self.state_time)
    }
}

/// Whether the renderer must mirror an actor's frames.
///
/// Every stock sheet is drawn facing left, so frames are mirrored exactly
/// when the actor faces right. Evaluated per draw; nothing is cached.
#[inline]
pub fn sprite_flipped(facing_right: bool) -> bool {
    facing_right
}

/// Pick the player's animation for this frame.
///
/// Priority: death, then an active shot (cleared when its clip ends), then
/// vertical motion, horizontal motion, and finally standing or crouching.
pub fn update_player(
    anim: &mut Animator<PlayerAnim>,
    clips: &ClipSet<PlayerAnim>,
    vitals: &mut Vitals,
    shooting: &mut bool,
    vel: Vec2,
    crouching: bool,
    move_speed: f32,
) {
    if vitals.is_dead {
        anim.set(PlayerAnim::Death);
        if anim.is_finished(clips) {
            vitals.mark_disposable();
        }
        return;
    }

    if *shooting && anim.is_finished(clips) {
        *shooting = false;
        anim.restart();
    }
    let shooting = *shooting;

    let key = if vel.y > 0.0 {
        if shooting { PlayerAnim::JumpShoot } else { PlayerAnim::Jump }
    } else if vel.y < 0.0 {
        if shooting { PlayerAnim::FallShoot } else { PlayerAnim::Fall }
    } else if vel.x != 0.0 {
        let running = vel.x.abs() > move_speed;
        match (running, shooting) {
            (true, true) => PlayerAnim::RunShoot,
            (true, false) => PlayerAnim::Run,
            (false, true) => PlayerAnim::WalkShoot,
            (false, false) => PlayerAnim::Walk,
        }
    } else if crouching {
        if shooting { PlayerAnim::CrouchShoot } else { PlayerAnim::CrouchIdle }
    } else if shooting {
        PlayerAnim::StandShoot
    } else {
        PlayerAnim::Idle
    };
    anim.set(key);
}

/// Pick an enemy's animation for this frame.
///
/// Priority: death (marks the enemy disposable once the clip ends), hit
/// reaction (held until its clip ends), then attack and locomotion.
pub fn update_enemy(
    anim: &mut Animator<EnemyAnim>,
    clips: &ClipSet<EnemyAnim>,
    vitals: &mut Vitals,
    attacking: &mut bool,
    vel: Vec2,
    locomotion: Locomotion,
) {
    if vitals.is_dead {
        anim.set(EnemyAnim::Death);
        if anim.is_finished(clips) {
            vitals.mark_disposable();
        }
        return;
    }

    if vitals.is_hit {
        anim.set(EnemyAnim::Hit);
        if !anim.is_finished(clips) {
            return;
        }
        vitals.is_hit = false;
        anim.restart();
    }

    if *attacking && anim.is_finished(clips) {
        *attacking = false;
        anim.restart();
    }
    let attacking = *attacking;

    let key = match locomotion {
        Locomotion::Ground => match (vel.x != 0.0, attacking) {
            (true, true) => EnemyAnim::WalkAttack,
            (true, false) => EnemyAnim::Walk,
            (false, true) => EnemyAnim::Attack,
            (false, false) => EnemyAnim::Idle,
        },
        Locomotion::Air => {
            if attacking {
                EnemyAnim::Attack
            } else if vel.y != 0.0 {
                EnemyAnim::Fly
            } else if vel.x != 0.0 {
                EnemyAnim::Walk
            } else {
                EnemyAnim::Idle
            }
        }
    };
    anim.set(key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals() -> Vitals {
        Vitals::new(100)
    }

    #[test]
    fn test_clip_finishes_after_duration() {
        let clip = Clip::once(3);
        assert!((clip.duration() - 0.3).abs() < 1e-6);
        assert!(!clip.is_finished(0.0));
        assert!(!clip.is_finished(0.29));
        assert!(clip.is_finished(0.31));
    }

    #[test]
    fn test_looping_clip_never_finishes() {
        assert!(!Clip::looping(2).is_finished(100.0));
    }

    #[test]
    fn test_standard_library_is_complete() {
        let library = AnimationLibrary::standard();
        assert!(library.validate(&SimulationConfig::default()).is_ok());
    }

    #[test]
    fn test_missing_clip_fails_validation() {
        let mut library = AnimationLibrary::standard();
        library.ground_enemy = ClipSet::new().with(EnemyAnim::Idle, Clip::looping(7));
        let err = library.validate(&SimulationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::MissingClip { actor: "enemy", key: "WALK" }
        ));
    }

    #[test]
    fn test_set_resets_time_only_on_change() {
        let mut anim = Animator::new(PlayerAnim::Idle);
        anim.advance(0.4);
        anim.set(PlayerAnim::Idle);
        assert_eq!(anim.state_time, 0.4);
        anim.set(PlayerAnim::Walk);
        assert_eq!(anim.state_time, 0.0);
    }

    #[test]
    fn test_player_priority() {
        let clips = AnimationLibrary::standard().player;
        let mut anim = Animator::new(PlayerAnim::Idle);
        let mut v = vitals();
        let mut shooting = false;

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::new(100.0, 10.0), false, 100.0);
        assert_eq!(anim.key, PlayerAnim::Jump);

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::new(0.0, -10.0), false, 100.0);
        assert_eq!(anim.key, PlayerAnim::Fall);

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::new(300.0, 0.0), false, 100.0);
        assert_eq!(anim.key, PlayerAnim::Run);

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::new(-100.0, 0.0), false, 100.0);
        assert_eq!(anim.key, PlayerAnim::Walk);

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::ZERO, true, 100.0);
        assert_eq!(anim.key, PlayerAnim::CrouchIdle);

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::ZERO, false, 100.0);
        assert_eq!(anim.key, PlayerAnim::Idle);
    }

    #[test]
    fn test_player_shot_ends_with_clip() {
        let clips = AnimationLibrary::standard().player;
        let mut anim = Animator::new(PlayerAnim::Idle);
        let mut v = vitals();
        let mut shooting = true;

        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::ZERO, false, 100.0);
        assert_eq!(anim.key, PlayerAnim::StandShoot);

        anim.advance(0.3);
        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::ZERO, false, 100.0);
        assert!(shooting);
        assert_eq!(anim.key, PlayerAnim::StandShoot);

        anim.advance(0.3);
        update_player(&mut anim, &clips, &mut v, &mut shooting, Vec2::ZERO, false, 100.0);
        assert!(!shooting);
        assert_eq!(anim.key, PlayerAnim::Idle);
    }

    #[test]
    fn test_enemy_hit_holds_then_falls_through() {
        let clips = AnimationLibrary::standard().ground_enemy;
        let mut anim = Animator::new(EnemyAnim::Walk);
        let mut v = vitals();
        let mut attacking = false;
        v.apply_damage(25);

        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::new(100.0, 0.0), Locomotion::Ground);
        assert_eq!(anim.key, EnemyAnim::Hit);

        anim.advance(0.2);
        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::new(100.0, 0.0), Locomotion::Ground);
        assert!(v.is_hit);
        assert_eq!(anim.key, EnemyAnim::Hit);

        anim.advance(0.2);
        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::new(100.0, 0.0), Locomotion::Ground);
        assert!(!v.is_hit);
        assert_eq!(anim.key, EnemyAnim::Walk);
    }

    #[test]
    fn test_enemy_death_marks_disposable_after_clip() {
        let clips = AnimationLibrary::standard().ground_enemy;
        let mut anim = Animator::new(EnemyAnim::Idle);
        let mut v = vitals();
        let mut attacking = false;
        v.apply_damage(100);

        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::ZERO, Locomotion::Ground);
        assert_eq!(anim.key, EnemyAnim::Death);
        assert!(!v.is_disposable);

        anim.advance(1.3);
        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::ZERO, Locomotion::Ground);
        assert!(!v.is_disposable);

        anim.advance(0.2);
        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::ZERO, Locomotion::Ground);
        assert!(v.is_disposable);
        assert_eq!(anim.key, EnemyAnim::Death);
    }

    #[test]
    fn test_flyer_uses_fly_for_vertical_motion() {
        let clips = AnimationLibrary::standard().flying_enemy;
        let mut anim = Animator::new(EnemyAnim::Idle);
        let mut v = vitals();
        let mut attacking = false;

        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::new(10.0, -5.0), Locomotion::Air);
        assert_eq!(anim.key, EnemyAnim::Fly);

        attacking = true;
        update_enemy(&mut anim, &clips, &mut v, &mut attacking, Vec2::new(10.0, -5.0), Locomotion::Air);
        assert_eq!(anim.key, EnemyAnim::Attack);
    }

    #[test]
    fn test_flip_follows_facing() {
        assert!(sprite_flipped(true));
        assert!(!sprite_flipped(false));
    }
}
