//! Back-to-front draw pass
//!
//! The sim never talks to a canvas directly; the host hands in anything
//! implementing [`DrawSurface`] and this module decides what gets drawn
//! where, in a fixed order: background, enemies, player, bullets. Draw order
//! is the only depth rule.

use crate::sim::{GameState, Rect, Viewport};

/// A drawable sprite reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player,
    Bullet,
    /// One of the interchangeable enemy variants
    Enemy(u8),
}

/// Abstract 2D render target supplied by the host
pub trait DrawSurface {
    /// Natural pixel size of the sprite's image, if the host knows it
    fn sprite_size(&self, sprite: Sprite) -> Option<(f32, f32)>;
    /// Fill the whole viewport with the fallback background color
    fn fill_background(&mut self);
    /// Draw a sprite's image scaled into the given rectangle
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
}

/// Destination rectangle that covers the viewport with an image while
/// preserving its aspect ratio: scale by the larger axis ratio, center,
/// and let the overflow crop.
pub fn cover_rect(image_w: f32, image_h: f32, viewport: Viewport) -> Rect {
    let scale = (viewport.w / image_w).max(viewport.h / image_h);
    let w = image_w * scale;
    let h = image_h * scale;
    Rect::new((viewport.w - w) / 2.0, (viewport.h - h) / 2.0, w, h)
}

/// Draw one frame
pub fn render(state: &GameState, viewport: Viewport, surface: &mut impl DrawSurface) {
    match surface.sprite_size(Sprite::Background) {
        Some((w, h)) if w > 0.0 && h > 0.0 => {
            surface.draw_sprite(Sprite::Background, cover_rect(w, h, viewport));
        }
        _ => surface.fill_background(),
    }

    for enemy in &state.enemies {
        surface.draw_sprite(Sprite::Enemy(enemy.sprite), enemy.rect);
    }

    surface.draw_sprite(Sprite::Player, state.player.rect);

    for bullet in &state.bullets {
        surface.draw_sprite(Sprite::Bullet, bullet.rect);
    }
}
