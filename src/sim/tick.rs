//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{clamp_to_band, hits, player_band};
use super::events::GameEvent;
use super::spawner::advance_spawner;
use super::state::{GamePhase, GameState, ObjectKind, ROAD_SCROLL_SPEED};
use crate::consts::SIM_DT;

/// Road dash pattern length; the scroll offset wraps at this period
pub const ROAD_DASH_PERIOD: f32 = 80.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
    /// Begin a session from the title screen
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the game-over summary
    pub restart: bool,
}

impl TickInput {
    /// Drop one-shot actions once a tick has consumed them
    pub fn clear_actions(&mut self) {
        self.start = false;
        self.pause = false;
        self.restart = false;
    }
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Idle => {
            if input.start {
                start_session(state);
            }
            return;
        }
        GamePhase::Ended => {
            if input.restart {
                state.phase = GamePhase::Idle;
                log::info!("Back to title (last score {})", state.score);
            }
            return;
        }
        GamePhase::Paused => {
            if !input.pause {
                return;
            }
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
        }
    }

    let frames = dt / SIM_DT;
    let dt_ms = dt * 1000.0;
    state.time_ticks += 1;

    // Difficulty follows score every tick, spawns or not
    state.apply_difficulty();

    // Player intent and movement
    let player = &mut state.player;
    player.moving_left = input.left;
    player.moving_right = input.right;
    player.moving_up = input.up;
    player.moving_down = input.down;
    player.boosting = input.boost;

    let proposed = player.pos + player.velocity(state.tuning.boost_multiplier) * frames;
    player.pos = clamp_to_band(proposed, player.size, &player_band());

    // Render-side timers
    let effects = &mut state.effects;
    effects.decay(dt_ms);
    if player.is_moving() {
        let rate = if player.boosting { 2.0 } else { 1.0 };
        effects.anim_ms += dt_ms * rate;
    }
    effects.road_offset =
        (effects.road_offset + ROAD_SCROLL_SPEED * state.speed_multiplier * frames)
            % ROAD_DASH_PERIOD;

    advance_spawner(state, dt_ms);

    for obj in &mut state.objects {
        obj.pos.y += obj.speed * frames;
    }

    resolve_collisions(state);

    // Missed objects fall out silently
    state.objects.retain(|o| !o.is_off_field());
}

/// Idle -> Playing with a clean slate
pub fn start_session(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Started);
    log::info!(
        "Session started (seed {}, vehicle {})",
        state.seed,
        state.player.vehicle.as_str()
    );
}

/// Test every live object against the player; each hit object is removed
/// before its effect applies, so it can only ever resolve once.
fn resolve_collisions(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mode = state.tuning.hit_test;

    let mut i = 0;
    while i < state.objects.len() {
        if !hits(mode, &player_rect, &state.objects[i].rect()) {
            i += 1;
            continue;
        }
        let obj = state.objects.remove(i);

        match obj.kind {
            ObjectKind::Product => {
                let points = state.tuning.product_points;
                state.score += points;
                state.effects.trigger_collect();
                state.events.push(GameEvent::Collected { id: obj.id, points });
                state.events.push(GameEvent::ScoreChanged(state.score));
            }
            ObjectKind::Obstacle => {
                state.lives = state.lives.saturating_sub(1);
                state.effects.trigger_hit();
                state.events.push(GameEvent::Hit {
                    id: obj.id,
                    lives_left: state.lives,
                });
                if state.lives == 0 {
                    end_session(state);
                    return;
                }
            }
        }
    }
}

/// Playing -> Ended; records a new best when beaten
fn end_session(state: &mut GameState) {
    state.phase = GamePhase::Ended;
    state.new_best = state.score > state.best_score;
    if state.new_best {
        state.best_score = state.score;
    }
    state.player.clear_intent();
    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_best: state.new_best,
    });
    log::info!(
        "Game over: score {} (best {}{})",
        state.score,
        state.best_score,
        if state.new_best { ", new best" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, START_LIVES};
    use crate::sim::spawner::spawn_kind;
    use proptest::prelude::*;
    use rand::Rng;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        state.events.clear();
        state
    }

    /// Put an object of `kind` squarely on the player
    fn drop_on_player(state: &mut GameState, kind: ObjectKind) -> u32 {
        let id = spawn_kind(state, kind);
        let target = state.player.rect().center();
        let obj = state.objects.iter_mut().find(|o| o.id == id).unwrap();
        obj.pos = target - obj.size * 0.5;
        obj.speed = 0.0;
        id
    }

    #[test]
    fn test_tick_idle_to_playing() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = started(1);
        state.score = 120;
        state.lives = 1;
        spawn_kind(&mut state, ObjectKind::Product);
        state.phase = GamePhase::Idle;

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert!(state.objects.is_empty());
        assert_eq!(state.spawn_rate_ms, state.tuning.base_spawn_rate_ms);
        assert_eq!(state.speed_multiplier, 1.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = started(12345);
        spawn_kind(&mut state, ObjectKind::Product);
        let y_before = state.objects[0].pos.y;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing moves while paused
        let timer = state.spawn_timer_ms;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos.y, y_before);
        assert_eq!(state.spawn_timer_ms, timer);

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.objects[0].pos.y > y_before);
        assert_eq!(state.events, vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_product_collision_scores_once() {
        let mut state = started(3);
        let id = drop_on_player(&mut state, ObjectKind::Product);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 10);
        assert!(state.objects.iter().all(|o| o.id != id));
        assert!(state.events.contains(&GameEvent::Collected { id, points: 10 }));
        assert!(state.events.contains(&GameEvent::ScoreChanged(10)));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_obstacle_collision_costs_one_life() {
        let mut state = started(4);
        let id = drop_on_player(&mut state, ObjectKind::Obstacle);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.objects.iter().all(|o| o.id != id));
        let hits = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { .. }))
            .count();
        assert_eq!(hits, 1);
        assert!(state.effects.hit_flash_ms > 0.0);
        assert!(state.effects.shake > 0.0);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut state = started(5);
        state.lives = 1;
        state.score = 40;
        state.best_score = 30;
        drop_on_player(&mut state, ObjectKind::Obstacle);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.lives, 0);
        assert_eq!(state.best_score, 40);
        assert!(state.new_best);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 40,
            new_best: true
        }));

        // Ended is terminal until restart
        state.events.clear();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.events.is_empty());

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_game_over_stops_remaining_collisions() {
        let mut state = started(6);
        state.lives = 1;
        drop_on_player(&mut state, ObjectKind::Obstacle);
        drop_on_player(&mut state, ObjectKind::Product);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_missed_objects_are_discarded() {
        let mut state = started(7);
        let id = spawn_kind(&mut state, ObjectKind::Obstacle);
        // Move it to the far side of the field from the player, near the bottom
        let player_x = state.player.pos.x;
        let obj = state.objects.iter_mut().find(|o| o.id == id).unwrap();
        obj.pos.x = if player_x > 400.0 { 0.0 } else { 760.0 };
        obj.pos.y = FIELD_HEIGHT - 1.0;
        obj.speed = 5.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.objects.iter().all(|o| o.id != id));
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = started(8);
        let x0 = state.player.pos.x;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert!((state.player.pos.x - (x0 + state.player.base_speed)).abs() < 1e-3);

        let left = TickInput {
            left: true,
            boost: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &left, SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_objects_stay_in_id_order() {
        let mut state = started(314);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..900 {
            tick(&mut state, &right, SIM_DT);
            assert!(state.objects.windows(2).all(|w| w[0].id < w[1].id));
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                boost: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.spawn_timer_ms, state2.spawn_timer_ms);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.events, state2.events);

        assert!(!state1.objects.is_empty());
        assert_eq!(state1.objects.len(), state2.objects.len());
        for (a, b) in state1.objects.iter().zip(&state2.objects) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
            assert_eq!(a.variant, b.variant);
            assert_eq!(a.payload.name, b.payload.name);
        }

        // RNG streams are still in lockstep
        let next1: u64 = state1.rng.random();
        let next2: u64 = state2.rng.random();
        assert_eq!(next1, next2);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 5]>(), prop::bool::weighted(0.02)).prop_map(|(dirs, pause)| TickInput {
            left: dirs[0],
            right: dirs[1],
            up: dirs[2],
            down: dirs[3],
            boost: dirs[4],
            pause,
            ..Default::default()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_lives_and_score_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..1500),
        ) {
            let mut state = started(seed);
            let mut last_score = state.score;
            let mut last_lives = state.lives;
            let mut seen_ids = std::collections::HashSet::new();
            let mut removed = std::collections::HashSet::new();
            let mut game_overs = 0;

            for input in &inputs {
                let before: std::collections::HashSet<u32> =
                    state.objects.iter().map(|o| o.id).collect();
                tick(&mut state, input, SIM_DT);

                prop_assert!(state.lives <= START_LIVES);
                prop_assert!(state.lives <= last_lives);
                prop_assert!(state.score >= last_score);
                prop_assert_eq!((state.score - last_score) % 10, 0);

                for id in state.objects.iter().map(|o| o.id) {
                    prop_assert!(!removed.contains(&id));
                    seen_ids.insert(id);
                }
                let after: std::collections::HashSet<u32> =
                    state.objects.iter().map(|o| o.id).collect();
                removed.extend(before.difference(&after).copied());

                game_overs += state
                    .events
                    .drain(..)
                    .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                    .count();

                last_score = state.score;
                last_lives = state.lives;
            }
            prop_assert!(game_overs <= 1);
            if game_overs == 1 {
                prop_assert_eq!(state.phase, GamePhase::Ended);
                prop_assert_eq!(state.lives, 0);
            }
        }
    }
}
