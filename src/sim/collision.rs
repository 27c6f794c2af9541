//! Bullet/enemy collision sweep
//!
//! Both lists are walked in reverse so removals by index stay valid. Each
//! enemy consumes at most one bullet per frame and each bullet is spent on
//! its first match.

use super::state::{Bullet, Enemy};

/// Remove every overlapping bullet/enemy pair, pairing each enemy with the
/// first bullet found in reverse order. Returns the number of hits.
pub fn resolve_hits(enemies: &mut Vec<Enemy>, bullets: &mut Vec<Bullet>) -> u32 {
    let mut hits = 0;

    let mut i = enemies.len();
    while i > 0 {
        i -= 1;
        let enemy_rect = enemies[i].rect;

        let mut j = bullets.len();
        while j > 0 {
            j -= 1;
            if enemy_rect.overlaps(&bullets[j].rect) {
                enemies.remove(i);
                bullets.remove(j);
                hits += 1;
                break;
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, 60.0, 60.0),
            speed: 170.0,
            sprite: 0,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            rect: Rect::new(x, y, 18.0, 18.0),
            speed: 760.0,
        }
    }

    #[test]
    fn test_hit_removes_one_of_each() {
        let mut enemies = vec![enemy_at(100.0, 100.0)];
        let mut bullets = vec![bullet_at(110.0, 110.0)];

        let hits = resolve_hits(&mut enemies, &mut bullets);
        assert_eq!(hits, 1);
        assert!(enemies.is_empty());
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_miss_removes_nothing() {
        let mut enemies = vec![enemy_at(100.0, 100.0)];
        let mut bullets = vec![bullet_at(400.0, 400.0)];

        let hits = resolve_hits(&mut enemies, &mut bullets);
        assert_eq!(hits, 0);
        assert_eq!(enemies.len(), 1);
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn test_one_bullet_kills_only_one_enemy() {
        // Two enemies stacked on the same spot, one bullet inside both
        let mut enemies = vec![enemy_at(100.0, 100.0), enemy_at(100.0, 100.0)];
        let mut bullets = vec![bullet_at(110.0, 110.0)];

        let hits = resolve_hits(&mut enemies, &mut bullets);
        assert_eq!(hits, 1);
        assert_eq!(enemies.len(), 1);
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_two_bullets_two_enemies() {
        let mut enemies = vec![enemy_at(0.0, 0.0), enemy_at(200.0, 0.0)];
        let mut bullets = vec![bullet_at(10.0, 10.0), bullet_at(210.0, 10.0)];

        let hits = resolve_hits(&mut enemies, &mut bullets);
        assert_eq!(hits, 2);
        assert!(enemies.is_empty());
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_reverse_order_pairing() {
        // Both bullets overlap the single enemy; the later-fired (last) one
        // is consumed, the earlier one survives.
        let mut enemies = vec![enemy_at(100.0, 100.0)];
        let mut bullets = vec![bullet_at(105.0, 105.0), bullet_at(130.0, 130.0)];

        let hits = resolve_hits(&mut enemies, &mut bullets);
        assert_eq!(hits, 1);
        assert!(enemies.is_empty());
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].rect.pos.x, 105.0);
    }
}
