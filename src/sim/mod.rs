//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One update per host frame, dt-clamped
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::resolve_hits;
pub use rect::Rect;
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Player, Viewport};
pub use tick::{FrameInput, update};
