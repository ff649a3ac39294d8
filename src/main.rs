//! Slug Sim headless driver
//!
//! Builds the demo level, populates it and drives the simulation with a
//! seeded scripted player for a fixed number of frames.
//!
//! Usage: `slug-sim [config.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use slug_sim::consts::SIM_DT;
use slug_sim::sim::{AnimationLibrary, GameEvent, GamePhase, GameState, Level, TickInput, tick};
use slug_sim::{SimError, SimulationConfig};

/// Frames to simulate (one minute at 60 Hz)
const FRAMES: u32 = 3600;
const SEED: u64 = 12345;

/// Pseudo-player that holds a random intent for a random number of frames
struct ScriptedInput {
    rng: Pcg32,
    current: TickInput,
    frames_left: u32,
}

impl ScriptedInput {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            current: TickInput::default(),
            frames_left: 0,
        }
    }

    fn poll(&mut self) -> TickInput {
        if self.frames_left == 0 {
            self.frames_left = self.rng.random_range(10..60);
            let run = self.rng.random_bool(0.3);
            let direction = self.rng.random_range(0..3);
            self.current = TickInput {
                move_left: direction == 0 && !run,
                move_right: direction == 1 && !run,
                run_left: direction == 0 && run,
                run_right: direction == 1 && run,
                jump: self.rng.random_bool(0.3),
                attack: self.rng.random_bool(0.4),
                crouch: direction == 2 && self.rng.random_bool(0.2),
                pause: false,
            };
            return self.current;
        }
        self.frames_left -= 1;
        // Jump only on the first frame so every segment is a fresh press
        self.current.jump = false;
        self.current
    }
}

#[derive(Debug, Default)]
struct Tally {
    jumps: u32,
    shots: u32,
    enemy_hits: u32,
    kills: u32,
    removed: u32,
    player_hits: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Jumped => self.jumps += 1,
            GameEvent::ShotFired { .. } => self.shots += 1,
            GameEvent::EnemyHit { .. } => self.enemy_hits += 1,
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::EnemyRemoved { .. } => self.removed += 1,
            GameEvent::PlayerHit | GameEvent::PlayerKilled => self.player_hits += 1,
            GameEvent::EnemyAttack { .. } => {}
        }
    }
}

fn run() -> Result<(), SimError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mut state = GameState::new(config, AnimationLibrary::standard(), Level::demo())?;
    state.spawn_on_platforms();
    log::info!("Spawned {} enemies", state.enemies.len());

    let mut script = ScriptedInput::new(SEED);
    let mut tally = Tally::default();
    for _ in 0..FRAMES {
        let input = script.poll();
        tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            tally.record(event);
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let player = state.player_view();
    log::info!(
        "Finished after {} ticks: player {} at ({:.1}, {:.1}) health {}",
        state.time_ticks,
        player.anim,
        player.position.x,
        player.position.y,
        player.health
    );
    log::info!(
        "{} jumps, {} shots, {} enemy hits, {} kills, {} removed, {} player hits, {} enemies left",
        tally.jumps,
        tally.shots,
        tally.enemy_hits,
        tally.kills,
        tally.removed,
        tally.player_hits,
        state.enemies.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Slug Sim (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
