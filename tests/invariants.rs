//! Invariants that must hold after every tick, for any input script

use glam::Vec2;
use proptest::prelude::*;

use slug_sim::SimulationConfig;
use slug_sim::consts::SIM_DT;
use slug_sim::sim::{
    AnimationLibrary, EnemyKind, GameState, Level, TickInput, Vitals, tick,
};

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(move_left, move_right, run_left, run_right, jump, attack, crouch)| TickInput {
                move_left,
                move_right,
                run_left,
                run_right,
                jump,
                attack,
                crouch,
                pause: false,
            },
        )
}

/// Demo level with the stock spawns plus a few enemies right next to the player
fn crowded_state() -> GameState {
    let mut state = GameState::new(
        SimulationConfig::default(),
        AnimationLibrary::standard(),
        Level::demo(),
    )
    .unwrap();
    state.spawn_on_platforms();
    let spawn = state.level.player_spawn;
    state.spawn_enemy(EnemyKind::Ground, Vec2::new(spawn.x + 150.0, 0.0));
    state.spawn_enemy(EnemyKind::Ground, Vec2::new(spawn.x - 150.0, 0.0));
    state.spawn_enemy(EnemyKind::Flying, Vec2::new(spawn.x + 40.0, spawn.y + 200.0));
    state
}

fn check_vitals(vitals: &Vitals, max_health: i32) -> Result<(), TestCaseError> {
    prop_assert!(vitals.health >= 0 && vitals.health <= max_health);
    if vitals.is_dead {
        prop_assert_eq!(vitals.health, 0);
    }
    if vitals.is_disposable {
        prop_assert!(vitals.is_dead);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_world_stays_consistent(script in prop::collection::vec(input_strategy(), 1..400)) {
        let mut state = crowded_state();
        let max_health = state.config.max_health;
        let max_jumps = state.config.max_jumps;
        let width = state.level.width;

        for input in &script {
            tick(&mut state, input, SIM_DT);

            check_vitals(&state.player.vitals, max_health)?;
            prop_assert!(state.player.body.pos.y >= 0.0);
            prop_assert!(state.player.jump.count <= max_jumps);
            prop_assert_eq!(state.player.body.vel.x, 0.0);

            for enemy in &state.enemies {
                check_vitals(&enemy.vitals, max_health)?;
                prop_assert!(enemy.body.pos.y >= 0.0);
                // Disposable enemies are gone by the end of the tick that flagged them
                prop_assert!(!enemy.vitals.is_disposable);
                if enemy.attacking {
                    prop_assert!(enemy.vitals.is_alive());
                }
            }

            for bullet in &state.bullets {
                prop_assert!(bullet.pos.x >= 0.0 && bullet.pos.x <= width);
            }
        }
    }

    #[test]
    fn prop_identical_scripts_are_deterministic(
        script in prop::collection::vec(input_strategy(), 1..200)
    ) {
        let mut a = crowded_state();
        let mut b = crowded_state();
        for input in &script {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
            prop_assert_eq!(&a.events, &b.events);
        }
        prop_assert_eq!(a.player.body.pos, b.player.body.pos);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
    }

    #[test]
    fn prop_damage_never_leaves_bounds(hits in prop::collection::vec(0i32..200, 0..20)) {
        let mut vitals = Vitals::new(100);
        for amount in hits {
            vitals.apply_damage(amount);
            check_vitals(&vitals, 100)?;
        }
    }
}
