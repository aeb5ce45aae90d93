//! Collision System
//!
//! Player-vs-world collision using AABB overlap and minimum-penetration
//! resolution. Platforms are static; only the player is ever moved.
//!
//! Resolution order on equal penetration: top, bottom, left, right. Each
//! axis has a guard (falling for top, rising for bottom, airborne for the
//! sides); a minimum whose guard fails falls through to the next axis.

use crate::config::{EXIT_RADIUS, WALL_SLIDE_TIMER};
use crate::world::{ExitSpec, ObstacleSpec};
use super::collectible::Collectible;
use super::geometry::{rect_overlap, Rect};
use super::player::Player;

/// Side of the platform the player was pushed out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Top,
    Bottom,
    Left,
    Right,
    /// Overlapping, but no axis guard accepted a resolution this tick
    Unresolved,
}

/// Resolve the player against one static platform.
///
/// Without overlap this only clears `on_wall`; `on_ground` is owned by the
/// player update and by top contacts.
pub fn resolve_player_platform(player: &mut Player, platform: &Rect) -> Contact {
    let bounds = player.bounds();

    if !rect_overlap(&bounds, platform) {
        player.on_wall = false;
        return Contact::None;
    }

    let overlap_left = bounds.right() - platform.x;
    let overlap_right = platform.right() - bounds.x;
    let overlap_top = bounds.bottom() - platform.y;
    let overlap_bottom = platform.bottom() - bounds.y;

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min_overlap == overlap_top && player.velocity.y >= 0.0 {
        player.y = platform.y - player.height;
        player.velocity.y = 0.0;
        player.on_ground = true;
        player.on_wall = false;
        Contact::Top
    } else if min_overlap == overlap_bottom && player.velocity.y < 0.0 {
        player.y = platform.bottom();
        player.velocity.y = 0.0;
        player.on_wall = false;
        Contact::Bottom
    } else if min_overlap == overlap_left && !player.on_ground {
        // Player is on the platform's left side, jump away to the left
        player.x = platform.x - player.width;
        if player.velocity.y > 0.0 {
            cling_to_wall(player, -1);
        }
        Contact::Left
    } else if min_overlap == overlap_right && !player.on_ground {
        player.x = platform.right();
        if player.velocity.y > 0.0 {
            cling_to_wall(player, 1);
        }
        Contact::Right
    } else {
        Contact::Unresolved
    }
}

fn cling_to_wall(player: &mut Player, launch_direction: i8) {
    player.on_wall = true;
    player.wall_jump_direction = launch_direction;
    player.wall_slide_timer = WALL_SLIDE_TIMER;
}

/// Resolve against an obstacle from level data
pub fn resolve_player_obstacle(player: &mut Player, obstacle: &ObstacleSpec) -> Contact {
    resolve_player_platform(player, &obstacle.bounds())
}

/// Uncollected and overlapping
pub fn check_player_collectible(player: &Player, collectible: &Collectible) -> bool {
    if collectible.collected {
        return false;
    }
    rect_overlap(&player.bounds(), &collectible.bounds())
}

/// Overlap with the exit circle's bounding square
pub fn check_player_exit(player: &Player, exit: &ExitSpec) -> bool {
    let exit_bounds = exit_bounds(exit);
    rect_overlap(&player.bounds(), &exit_bounds)
}

pub fn exit_bounds(exit: &ExitSpec) -> Rect {
    Rect::centered(exit.x, exit.y, EXIT_RADIUS * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerSettings;
    use crate::game::collectible::CollectibleKind;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(x, y, PlayerSettings::default())
    }

    #[test]
    fn test_top_contact_lands_player() {
        let platform = Rect::new(0.0, 300.0, 400.0, 20.0);
        let mut player = player_at(100.0, 253.0);
        player.velocity.y = 3.0;

        let contact = resolve_player_platform(&mut player, &platform);

        assert_eq!(contact, Contact::Top);
        assert!(player.on_ground);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.y, platform.y - player.height);
        assert!(!player.on_wall);
    }

    #[test]
    fn test_bottom_contact_stops_rise() {
        let platform = Rect::new(0.0, 100.0, 400.0, 20.0);
        let mut player = player_at(100.0, 115.0);
        player.velocity.y = -6.0;

        let contact = resolve_player_platform(&mut player, &platform);

        assert_eq!(contact, Contact::Bottom);
        assert_eq!(player.y, 120.0);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_falling_side_contact_clings_to_wall() {
        let wall = Rect::new(300.0, 0.0, 40.0, 400.0);
        // Overlapping the wall's left edge by 4px
        let mut player = player_at(254.0, 100.0);
        player.velocity.y = 2.0;

        let contact = resolve_player_platform(&mut player, &wall);

        assert_eq!(contact, Contact::Left);
        assert_eq!(player.x, 250.0);
        assert!(player.on_wall);
        assert_eq!(player.wall_jump_direction, -1);
        assert_eq!(player.wall_slide_timer, WALL_SLIDE_TIMER);
    }

    #[test]
    fn test_right_side_contact_launches_right() {
        let wall = Rect::new(300.0, 0.0, 40.0, 400.0);
        let mut player = player_at(336.0, 100.0);
        player.velocity.y = 1.0;

        let contact = resolve_player_platform(&mut player, &wall);

        assert_eq!(contact, Contact::Right);
        assert_eq!(player.x, 340.0);
        assert_eq!(player.wall_jump_direction, 1);
    }

    #[test]
    fn test_rising_side_contact_does_not_cling() {
        let wall = Rect::new(300.0, 0.0, 40.0, 400.0);
        let mut player = player_at(254.0, 100.0);
        player.velocity.y = -4.0;

        resolve_player_platform(&mut player, &wall);

        assert_eq!(player.x, 250.0);
        assert!(!player.on_wall);
        assert_eq!(player.wall_slide_timer, 0);
    }

    #[test]
    fn test_grounded_player_ignores_side_contact() {
        let wall = Rect::new(300.0, 0.0, 40.0, 400.0);
        let mut player = player_at(254.0, 100.0);
        player.on_ground = true;

        let contact = resolve_player_platform(&mut player, &wall);

        assert_eq!(contact, Contact::Unresolved);
        assert_eq!(player.x, 254.0);
    }

    #[test]
    fn test_no_overlap_clears_wall_flag_only() {
        let platform = Rect::new(500.0, 500.0, 10.0, 10.0);
        let mut player = player_at(0.0, 0.0);
        player.on_wall = true;
        player.on_ground = true;

        assert_eq!(resolve_player_platform(&mut player, &platform), Contact::None);
        assert!(!player.on_wall);
        assert!(player.on_ground);
    }

    #[test]
    fn test_top_wins_exact_tie() {
        // 10px penetration from the top and from the left
        let platform = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut player = player_at(60.0, 60.0);
        player.velocity.y = 1.0;

        assert_eq!(resolve_player_platform(&mut player, &platform), Contact::Top);
    }

    #[test]
    fn test_collectible_check() {
        let player = player_at(100.0, 100.0);
        let mut item = Collectible::new(120.0, 120.0, CollectibleKind::Coin, 0.0);
        assert!(check_player_collectible(&player, &item));
        item.collect();
        assert!(!check_player_collectible(&player, &item));

        let far = Collectible::new(400.0, 400.0, CollectibleKind::Gem, 0.0);
        assert!(!check_player_collectible(&player, &far));
    }

    #[test]
    fn test_exit_check_uses_bounding_square() {
        let exit = ExitSpec { x: 200.0, y: 200.0 };
        // Square spans 170..230; player spans 120..170 touches the edge only
        let touching = player_at(120.0, 180.0);
        assert!(!check_player_exit(&touching, &exit));
        let inside = player_at(125.0, 180.0);
        assert!(check_player_exit(&inside, &exit));
    }
}
