//! Court Smash - a falling-enemies arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, score)
//! - `render`: Back-to-front draw pass over an abstract 2D surface
//! - `assets`: Visual resource manifest and load errors
//! - `ui`: Frame-ticked transient notifications
//! - `persistence`: Best score save/load (LocalStorage on web)

pub mod assets;
pub mod persistence;
pub mod render;
pub mod sim;
pub mod ui;

pub use persistence::BestScore;
pub use sim::{FrameInput, GamePhase, GameState, Viewport};

/// Game tuning constants
pub mod consts {
    /// Per-frame delta time cap in seconds (~2 frames at 60 Hz).
    /// Keeps the sim from leaping after a tab switch stalls the host loop.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Player horizontal speed (px/s)
    pub const PLAYER_SPEED: f32 = 420.0;
    /// Player size as a fraction of viewport width
    pub const PLAYER_SIZE_RATIO: f32 = 0.12;
    /// Player size bounds (px, square)
    pub const PLAYER_SIZE_MIN: f32 = 64.0;
    pub const PLAYER_SIZE_MAX: f32 = 86.0;
    /// Horizontal margin the player may not cross (px)
    pub const EDGE_MARGIN: f32 = 8.0;
    /// Height of the strip reserved for on-screen controls (px)
    pub const CONTROLS_HEIGHT: f32 = 130.0;
    /// How far the player sprite overlaps the controls strip (px)
    pub const CONTROLS_OVERLAP: f32 = 26.0;

    /// Bullet size (px, square)
    pub const BULLET_SIZE: f32 = 18.0;
    /// Bullet upward speed (px/s)
    pub const BULLET_SPEED: f32 = 760.0;
    /// Maximum live bullets
    pub const MAX_BULLETS: usize = 2;
    /// Minimum interval between fire actions (ms)
    pub const FIRE_COOLDOWN_MS: f32 = 120.0;
    /// Bullets despawn once fully above y = -BULLET_DESPAWN_MARGIN
    pub const BULLET_DESPAWN_MARGIN: f32 = 30.0;

    /// Enemy size as a fraction of viewport width
    pub const ENEMY_SIZE_RATIO: f32 = 0.11;
    /// Enemy size bounds (px, square)
    pub const ENEMY_SIZE_MIN: f32 = 58.0;
    pub const ENEMY_SIZE_MAX: f32 = 84.0;
    /// Horizontal margin for enemy spawn positions (px)
    pub const ENEMY_SPAWN_MARGIN: f32 = 14.0;
    /// Enemies spawn this far above their own top edge (px)
    pub const ENEMY_SPAWN_GAP: f32 = 10.0;
    /// Enemies escape once below viewport bottom + this margin (px)
    pub const ENEMY_ESCAPE_MARGIN: f32 = 20.0;
    /// Per-enemy speed jitter, multiplicative on the base speed
    pub const ENEMY_SPEED_JITTER_MIN: f32 = 0.92;
    pub const ENEMY_SPEED_JITTER_MAX: f32 = 1.12;
    /// Number of interchangeable enemy sprite variants
    pub const ENEMY_SPRITE_COUNT: u8 = 5;

    /// Spawn interval at game start (ms)
    pub const SPAWN_INTERVAL_START_MS: f32 = 900.0;
    /// Spawn interval floor (ms)
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 340.0;
    /// Spawn interval reduction per difficulty step (ms)
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 35.0;
    /// Enemy base speed at game start (px/s)
    pub const ENEMY_SPEED_START: f32 = 170.0;
    /// Enemy base speed ceiling (px/s)
    pub const ENEMY_SPEED_MAX: f32 = 520.0;
    /// Enemy base speed increase per difficulty step (px/s)
    pub const ENEMY_SPEED_STEP: f32 = 18.0;
    /// Simulated seconds between difficulty steps
    pub const DIFFICULTY_INTERVAL_SECS: f32 = 4.0;

    /// Points awarded per enemy shot down
    pub const HIT_REWARD: u32 = 10;
    /// Points deducted per escaped enemy (clamped at zero)
    pub const ESCAPE_PENALTY: u32 = 3;

    /// New-best toast visibility duration (ms)
    pub const TOAST_DURATION_MS: f32 = 900.0;
}
