//! Game state and core simulation types
//!
//! All mutable gameplay state lives in [`GameState`]; the host owns exactly
//! one instance and drives it through `sim::update` once per frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
///
/// The game has no in-play exit: once `Running`, it stays `Running` until the
/// host discards the state. Enemies reaching the bottom only cost score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Pre-start / between games; the sim ignores everything but the start signal
    #[default]
    Idle,
    /// Active gameplay
    Running,
}

/// Viewport bounds, re-queried from the host every frame (never cached)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Something scoring-relevant happened this frame; drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A bullet destroyed an enemy
    EnemyDown,
    /// An enemy left the bottom of the viewport
    EnemyEscaped,
    /// Score surpassed the previous best (host persists and shows the toast)
    NewBest(u32),
}

/// The player's avatar
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal speed (px/s)
    pub speed: f32,
}

impl Player {
    /// Size and position the player for the given viewport (on game start)
    fn placed_in(viewport: Viewport) -> Self {
        let size = (viewport.w * PLAYER_SIZE_RATIO).clamp(PLAYER_SIZE_MIN, PLAYER_SIZE_MAX);
        let x = (viewport.w - size) / 2.0;
        let y = viewport.h - size - (CONTROLS_HEIGHT - CONTROLS_OVERLAP);
        Self {
            rect: Rect::new(x, y, size, size),
            speed: PLAYER_SPEED,
        }
    }
}

/// A projectile travelling up the screen
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub rect: Rect,
    /// Upward speed (px/s)
    pub speed: f32,
}

/// A falling enemy
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub rect: Rect,
    /// Downward speed (px/s), jittered around the current base speed
    pub speed: f32,
    /// Which of the interchangeable enemy sprites to draw
    pub sprite: u8,
}

/// Complete game state
///
/// Deterministic given the seed and the per-frame input/viewport sequence.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Best score this session; monotonic, loaded from persistence at startup
    pub best: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Current enemy spawn interval (ms), tightened by the difficulty ramp
    pub spawn_interval_ms: f32,
    /// Current enemy base speed (px/s), raised by the difficulty ramp
    pub enemy_base_speed: f32,
    /// Seconds accumulated toward the next difficulty step
    pub(super) difficulty_timer: f32,
    /// Milliseconds accumulated toward the next spawn
    pub(super) spawn_acc_ms: f32,
    /// Remaining fire cooldown (ms); firing is allowed at zero
    pub(super) fire_cooldown_ms: f32,
    /// Events produced this frame, drained by the host
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game with the given RNG seed and persisted best score
    pub fn new(seed: u64, best: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            best,
            player: Player::placed_in(Viewport::new(0.0, 0.0)),
            bullets: Vec::new(),
            enemies: Vec::new(),
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            enemy_base_speed: ENEMY_SPEED_START,
            difficulty_timer: 0.0,
            spawn_acc_ms: 0.0,
            fire_cooldown_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start a game: reset score, entities, difficulty and timers.
    /// No-op while already `Running`.
    pub fn start(&mut self, viewport: Viewport) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Running;
        self.score = 0;
        self.bullets.clear();
        self.enemies.clear();
        self.spawn_interval_ms = SPAWN_INTERVAL_START_MS;
        self.enemy_base_speed = ENEMY_SPEED_START;
        self.difficulty_timer = 0.0;
        self.spawn_acc_ms = 0.0;
        self.fire_cooldown_ms = 0.0;
        self.player = Player::placed_in(viewport);
        log::info!("game started ({}x{})", viewport.w, viewport.h);
    }

    /// Fire a bullet from above the player's center.
    ///
    /// Edge-triggered by input; a no-op unless the game is running, the
    /// cooldown has expired and fewer than [`MAX_BULLETS`] are live. The
    /// cooldown is a remaining-ms counter ticked down in `update`, not a
    /// scheduled callback.
    pub fn fire(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.fire_cooldown_ms > 0.0 || self.bullets.len() >= MAX_BULLETS {
            return;
        }

        let p = &self.player.rect;
        self.bullets.push(Bullet {
            rect: Rect::new(
                p.pos.x + p.size.x / 2.0 - BULLET_SIZE / 2.0,
                p.pos.y - BULLET_SIZE,
                BULLET_SIZE,
                BULLET_SIZE,
            ),
            speed: BULLET_SPEED,
        });
        self.fire_cooldown_ms = FIRE_COOLDOWN_MS;
    }

    /// Spawn one enemy just above the viewport at a random x, with speed
    /// jittered around the current base speed and a uniformly chosen sprite
    pub(super) fn spawn_enemy(&mut self, viewport: Viewport) {
        let size = (viewport.w * ENEMY_SIZE_RATIO).clamp(ENEMY_SIZE_MIN, ENEMY_SIZE_MAX);
        let x_max = viewport.w - size - ENEMY_SPAWN_MARGIN;
        let x = if x_max > ENEMY_SPAWN_MARGIN {
            self.rng.random_range(ENEMY_SPAWN_MARGIN..x_max)
        } else {
            ENEMY_SPAWN_MARGIN
        };
        let jitter = self
            .rng
            .random_range(ENEMY_SPEED_JITTER_MIN..ENEMY_SPEED_JITTER_MAX);
        let sprite = self.rng.random_range(0..ENEMY_SPRITE_COUNT);

        self.enemies.push(Enemy {
            rect: Rect::new(x, -size - ENEMY_SPAWN_GAP, size, size),
            speed: self.enemy_base_speed * jitter,
            sprite,
        });
    }

    /// Award points for a destroyed enemy, updating best on a new record
    pub(super) fn award_hit(&mut self) {
        self.score += HIT_REWARD;
        self.push_event(GameEvent::EnemyDown);
        if self.score > self.best {
            self.best = self.score;
            self.push_event(GameEvent::NewBest(self.best));
        }
    }

    /// Deduct the escape penalty, clamping at zero
    pub(super) fn penalize_escape(&mut self) {
        self.score = self.score.saturating_sub(ESCAPE_PENALTY);
        self.push_event(GameEvent::EnemyEscaped);
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
