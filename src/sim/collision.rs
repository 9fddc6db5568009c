//! Platform landing and the death line
//!
//! Landing is a swept test of the player's bottom edge against platform tops
//! over one step of motion. Platforms are one-way: they only catch a player
//! moving down onto them.

use super::state::{Player, Platform};
use crate::config::Viewport;

/// Slack allowed when reconstructing the previous bottom edge, so a player
/// snapped onto a surface last step still registers as resting on it
pub const CONTACT_SLOP: f32 = 0.01;

/// Did the player's bottom edge cross this platform's top during the step?
#[inline]
pub fn crosses_top(player: &Player, platform: &Platform, dt: f32) -> bool {
    if player.vel.y < 0.0 || !player.overlaps_x(platform) {
        return false;
    }
    let bottom = player.bottom();
    let prev_bottom = bottom - player.vel.y * dt;
    let top = platform.top();
    prev_bottom <= top + CONTACT_SLOP && bottom >= top
}

/// Resolve at most one landing for this step
///
/// When several platforms qualify, the highest top wins (the surface the
/// bottom edge crossed first); list order breaks exact ties. Returns the index
/// of the platform landed on.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform], dt: f32) -> Option<usize> {
    player.on_ground = false;

    let (index, top) = platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| crosses_top(player, p, dt))
        .map(|(i, p)| (i, p.top()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    player.pos.y = top - player.size.y;
    player.vel.y = 0.0;
    player.on_ground = true;
    Some(index)
}

/// Bottom edge has reached the bottom of the viewport
#[inline]
pub fn is_dead(player: &Player, viewport: &Viewport) -> bool {
    player.bottom() >= viewport.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 120.0;

    fn falling_player(x: f32, bottom: f32, vy: f32) -> Player {
        let mut p = Player::new(Vec2::new(x, bottom - 56.0), Vec2::new(48.0, 56.0));
        p.vel.y = vy;
        p
    }

    #[test]
    fn test_lands_when_crossing_top() {
        let platforms = vec![Platform::new(0.0, 300.0, 4, 56.0)];
        // Moved 5px this step, bottom now 2px below the top
        let mut p = falling_player(50.0, 302.0, 600.0);

        assert_eq!(resolve_landing(&mut p, &platforms, DT), Some(0));
        assert_eq!(p.bottom(), 300.0);
        assert_eq!(p.vel.y, 0.0);
        assert!(p.on_ground);
    }

    #[test]
    fn test_no_landing_when_rising() {
        let platforms = vec![Platform::new(0.0, 300.0, 4, 56.0)];
        let mut p = falling_player(50.0, 302.0, -300.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), None);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_no_landing_from_below_top() {
        // Bottom was already well under the surface before this step
        let platforms = vec![Platform::new(0.0, 300.0, 4, 56.0)];
        let mut p = falling_player(50.0, 330.0, 120.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), None);
    }

    #[test]
    fn test_no_landing_without_horizontal_overlap() {
        let platforms = vec![Platform::new(0.0, 300.0, 2, 56.0)];
        // Platform spans 0..112; player starts exactly at its right edge
        let mut p = falling_player(112.0, 302.0, 600.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), None);

        // Player's right edge exactly touching the platform's left edge
        let platforms = vec![Platform::new(48.0, 300.0, 2, 56.0)];
        let mut p = falling_player(0.0, 302.0, 600.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), None);
    }

    #[test]
    fn test_resting_contact_is_stable() {
        let platforms = vec![Platform::new(0.0, 300.0, 4, 56.0)];
        let mut p = falling_player(50.0, 300.0, 0.0);
        let y = p.pos.y;
        for _ in 0..100 {
            // One step of gravity from rest
            p.vel.y += 1400.0 * DT;
            p.pos.y += p.vel.y * DT;
            assert!(resolve_landing(&mut p, &platforms, DT).is_some());
            assert_eq!(p.pos.y, y);
        }
    }

    #[test]
    fn test_highest_top_wins() {
        // Two overlapping platforms both crossed in one fast step
        let platforms = vec![
            Platform::new(0.0, 310.0, 4, 56.0),
            Platform::new(0.0, 300.0, 4, 56.0),
        ];
        let mut p = falling_player(50.0, 310.0, 1200.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), Some(1));
        assert_eq!(p.bottom(), 300.0);
    }

    #[test]
    fn test_equal_tops_take_first_in_list() {
        let platforms = vec![
            Platform::new(0.0, 300.0, 2, 56.0),
            Platform::new(60.0, 300.0, 2, 56.0),
        ];
        let mut p = falling_player(50.0, 302.0, 600.0);
        assert_eq!(resolve_landing(&mut p, &platforms, DT), Some(0));
    }

    #[test]
    fn test_ground_flag_recomputed_each_step() {
        let mut p = falling_player(500.0, 100.0, 100.0);
        p.on_ground = true;
        assert_eq!(resolve_landing(&mut p, &[], DT), None);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_death_line() {
        let viewport = Viewport::new(960.0, 540.0).unwrap();
        assert!(!is_dead(&falling_player(0.0, 539.0, 0.0), &viewport));
        assert!(is_dead(&falling_player(0.0, 540.0, 0.0), &viewport));
        assert!(is_dead(&falling_player(0.0, 900.0, 0.0), &viewport));
    }
}
