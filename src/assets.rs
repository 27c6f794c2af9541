//! Visual resource manifest
//!
//! Every image the game draws, by path. The host must load all of them
//! before the first frame; any failure is fatal to game start and surfaced
//! to the user as a blocking notice.

use thiserror::Error;

use crate::consts::ENEMY_SPRITE_COUNT;

/// Paths of all required images, relative to the served root
#[derive(Debug, Clone)]
pub struct AssetManifest {
    pub background: &'static str,
    pub player: &'static str,
    pub bullet: &'static str,
    pub enemies: [&'static str; ENEMY_SPRITE_COUNT as usize],
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "assets/court.png",
            player: "assets/player.png",
            bullet: "assets/tennisball.png",
            enemies: [
                "assets/enemy1.png",
                "assets/enemy2.png",
                "assets/enemy3.png",
                "assets/enemy4.png",
                "assets/enemy5.png",
            ],
        }
    }
}

impl AssetManifest {
    /// All paths in load order
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.background, self.player, self.bullet]
            .into_iter()
            .chain(self.enemies)
    }
}

/// Resource acquisition failure, the only fatal error class in the game
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image '{path}'")]
    ImageLoad { path: String },
}
