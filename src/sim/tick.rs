//! Per-frame simulation update
//!
//! The host calls [`update`] exactly once per rendered frame with the input
//! snapshot, the current viewport and the elapsed time. Everything in here is
//! deterministic given the state's seed and the input/viewport sequence.

use super::collision::resolve_hits;
use super::state::{GamePhase, GameState, Viewport};
use crate::consts::*;

/// Input snapshot for a single frame
///
/// `left`/`right` are held signals; `fire` and `start` are edge-triggered and
/// cleared by the host after each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub start: bool,
}

/// Advance the game by one frame.
///
/// `dt` is clamped to `[0, MAX_FRAME_DT]` seconds so a stalled host loop
/// (tab switch) cannot produce a huge step. While idle, only the start
/// signal is honored.
pub fn update(state: &mut GameState, input: &FrameInput, viewport: Viewport, dt: f32) {
    if state.phase == GamePhase::Idle {
        if input.start {
            state.start(viewport);
        }
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    // Fire cooldown is an expiring counter, ticked here rather than scheduled
    state.fire_cooldown_ms = (state.fire_cooldown_ms - dt * 1000.0).max(0.0);

    // Difficulty ramp: every few seconds, spawn faster and fall faster
    state.difficulty_timer += dt;
    if state.difficulty_timer >= DIFFICULTY_INTERVAL_SECS {
        state.difficulty_timer = 0.0;
        state.spawn_interval_ms =
            (state.spawn_interval_ms - SPAWN_INTERVAL_STEP_MS).max(SPAWN_INTERVAL_MIN_MS);
        state.enemy_base_speed = (state.enemy_base_speed + ENEMY_SPEED_STEP).min(ENEMY_SPEED_MAX);
        log::debug!(
            "difficulty step: spawn {}ms, speed {}px/s",
            state.spawn_interval_ms,
            state.enemy_base_speed
        );
    }

    // Move the player; opposing held directions cancel out
    let dir = (input.right as i32 - input.left as i32) as f32;
    let player = &mut state.player;
    player.rect.pos.x += dir * player.speed * dt;
    // min-then-max so the left margin wins on degenerate viewports
    player.rect.pos.x = player
        .rect
        .pos
        .x
        .min(viewport.w - player.rect.size.x - EDGE_MARGIN)
        .max(EDGE_MARGIN);

    if input.fire {
        state.fire();
    }

    // Timed spawner: at most one enemy per frame
    state.spawn_acc_ms += dt * 1000.0;
    if state.spawn_acc_ms >= state.spawn_interval_ms {
        state.spawn_acc_ms = 0.0;
        state.spawn_enemy(viewport);
    }

    // Advance bullets; drop the ones fully above the viewport
    for bullet in &mut state.bullets {
        bullet.rect.pos.y -= bullet.speed * dt;
    }
    state
        .bullets
        .retain(|b| b.rect.bottom() >= -BULLET_DESPAWN_MARGIN);

    // Advance enemies; escapes cost score
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy = &mut state.enemies[i];
        enemy.rect.pos.y += enemy.speed * dt;
        if enemy.rect.pos.y > viewport.h + ENEMY_ESCAPE_MARGIN {
            state.enemies.remove(i);
            state.penalize_escape();
        }
    }

    // Bullet/enemy hits
    let hits = resolve_hits(&mut state.enemies, &mut state.bullets);
    for _ in 0..hits {
        state.award_hit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Bullet, Enemy, GameEvent};
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport { w: 800.0, h: 600.0 };

    fn started() -> GameState {
        let mut state = GameState::new(42, 0);
        state.start(VIEW);
        state
    }

    fn run_for(state: &mut GameState, input: FrameInput, secs: f32, dt: f32) {
        let ticks = (secs / dt).round() as usize;
        for _ in 0..ticks {
            update(state, &input, VIEW, dt);
        }
    }

    #[test]
    fn test_idle_ignores_everything_but_start() {
        let mut state = GameState::new(1, 0);
        let input = FrameInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        update(&mut state, &input, VIEW, 0.016);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.bullets.is_empty());

        let input = FrameInput {
            start: true,
            ..Default::default()
        };
        update(&mut state, &input, VIEW, 0.016);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_difficulty_two_steps_in_ten_seconds() {
        let mut state = started();
        run_for(&mut state, FrameInput::default(), 10.0, 0.02);

        assert_eq!(state.enemy_base_speed, ENEMY_SPEED_START + 2.0 * ENEMY_SPEED_STEP);
        assert_eq!(
            state.spawn_interval_ms,
            SPAWN_INTERVAL_START_MS - 2.0 * SPAWN_INTERVAL_STEP_MS
        );
    }

    #[test]
    fn test_difficulty_bounds() {
        let mut state = started();
        // Far beyond every ramp step
        for _ in 0..60 {
            state.difficulty_timer = DIFFICULTY_INTERVAL_SECS;
            update(&mut state, &FrameInput::default(), VIEW, 0.02);
        }
        assert_eq!(state.spawn_interval_ms, SPAWN_INTERVAL_MIN_MS);
        assert_eq!(state.enemy_base_speed, ENEMY_SPEED_MAX);
    }

    #[test]
    fn test_player_clamps_at_edges() {
        let mut state = started();
        let right = FrameInput {
            right: true,
            ..Default::default()
        };
        run_for(&mut state, right, 5.0, 0.02);
        assert_eq!(
            state.player.rect.pos.x,
            VIEW.w - state.player.rect.size.x - EDGE_MARGIN
        );

        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        run_for(&mut state, left, 5.0, 0.02);
        assert_eq!(state.player.rect.pos.x, EDGE_MARGIN);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let mut state = started();
        let x0 = state.player.rect.pos.x;
        let input = FrameInput {
            left: true,
            right: true,
            ..Default::default()
        };
        run_for(&mut state, input, 1.0, 0.02);
        assert_eq!(state.player.rect.pos.x, x0);
    }

    #[test]
    fn test_first_spawn_after_initial_interval() {
        let mut state = started();
        // 0.875s simulated: still below the 900ms interval
        run_for(&mut state, FrameInput::default(), 0.875, 0.025);
        assert!(state.enemies.is_empty());

        // Crossing 900ms spawns exactly one
        run_for(&mut state, FrameInput::default(), 0.125, 0.025);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bullet_despawns_above_viewport() {
        let mut state = started();
        let input = FrameInput {
            fire: true,
            ..Default::default()
        };
        update(&mut state, &input, VIEW, 0.02);
        assert_eq!(state.bullets.len(), 1);

        // 760 px/s upward clears the viewport in well under a second
        run_for(&mut state, FrameInput::default(), 0.8, 0.02);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_escape_costs_exactly_three() {
        let mut state = started();
        state.score = 20;
        state.enemies.push(Enemy {
            rect: Rect::new(100.0, VIEW.h + ENEMY_ESCAPE_MARGIN - 1.0, 60.0, 60.0),
            speed: 100.0,
            sprite: 0,
        });

        update(&mut state, &FrameInput::default(), VIEW, 0.02);
        assert_eq!(state.score, 17);
        assert!(state.enemies.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::EnemyEscaped]);
    }

    #[test]
    fn test_escape_at_zero_stays_zero() {
        let mut state = started();
        state.enemies.push(Enemy {
            rect: Rect::new(100.0, VIEW.h + ENEMY_ESCAPE_MARGIN - 1.0, 60.0, 60.0),
            speed: 100.0,
            sprite: 0,
        });
        update(&mut state, &FrameInput::default(), VIEW, 0.02);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_hit_awards_ten_and_removes_pair() {
        let mut state = started();
        state.enemies.push(Enemy {
            rect: Rect::new(100.0, 100.0, 60.0, 60.0),
            speed: 100.0,
            sprite: 0,
        });
        state.bullets.push(Bullet {
            rect: Rect::new(110.0, 130.0, 18.0, 18.0),
            speed: 760.0,
        });

        update(&mut state, &FrameInput::default(), VIEW, 0.02);
        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyDown));
        assert!(events.contains(&GameEvent::NewBest(10)));
    }

    #[test]
    fn test_rapid_fire_respects_cooldown_and_cap() {
        // Tall viewport so bullets stay on screen the whole second
        let view = Viewport::new(800.0, 10_000.0);
        let mut state = GameState::new(42, 0);
        state.start(view);

        let input = FrameInput {
            fire: true,
            ..Default::default()
        };
        let mut max_live = 0;
        for _ in 0..20 {
            update(&mut state, &input, view, 0.05);
            max_live = max_live.max(state.bullets.len());
        }

        // 120ms cooldown on a 50ms cadence permits the second shot at 150ms;
        // after that the cap of 2 live bullets blocks everything.
        assert_eq!(state.bullets.len(), 2);
        assert_eq!(max_live, 2);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = started();
        let input = FrameInput {
            right: true,
            ..Default::default()
        };
        let x0 = state.player.rect.pos.x;
        update(&mut state, &input, VIEW, 5.0);
        let moved = state.player.rect.pos.x - x0;
        assert!(moved <= PLAYER_SPEED * MAX_FRAME_DT + 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(9001, 0);
        let mut b = GameState::new(9001, 0);
        a.start(VIEW);
        b.start(VIEW);

        for i in 0..600 {
            let input = FrameInput {
                left: i % 7 < 3,
                right: i % 11 < 4,
                fire: i % 9 == 0,
                start: false,
            };
            update(&mut a, &input, VIEW, 0.016);
            update(&mut b, &input, VIEW, 0.016);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.player.rect.pos.x, b.player.rect.pos.x);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.rect, eb.rect);
            assert_eq!(ea.sprite, eb.sprite);
        }
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            frames in prop::collection::vec((0.0f32..0.2, any::<bool>(), any::<bool>()), 1..80)
        ) {
            let mut state = started();
            for (dt, left, right) in frames {
                let input = FrameInput { left, right, ..Default::default() };
                update(&mut state, &input, VIEW, dt);
                let x = state.player.rect.pos.x;
                prop_assert!(x >= EDGE_MARGIN);
                prop_assert!(x <= VIEW.w - state.player.rect.size.x - EDGE_MARGIN);
            }
        }

        #[test]
        fn prop_core_invariants_hold(
            frames in prop::collection::vec((0.0f32..0.1, any::<bool>(), any::<bool>(), any::<bool>()), 1..200)
        ) {
            let mut state = started();
            let mut prev_best = state.best;
            for (dt, left, right, fire) in frames {
                let input = FrameInput { left, right, fire, ..Default::default() };
                update(&mut state, &input, VIEW, dt);
                // Bullet cap
                prop_assert!(state.bullets.len() <= MAX_BULLETS);
                // Best is monotonic and never behind the score
                prop_assert!(state.best >= prev_best);
                prop_assert!(state.best >= state.score);
                prev_best = state.best;
            }
        }
    }
}
