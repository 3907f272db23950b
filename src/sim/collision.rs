//! Collision resolution against static platforms
//!
//! Motion is resolved one axis at a time: horizontal first, then vertical,
//! then a sticking pass that keeps a resting body attached to its platform
//! when discrete steps leave it hovering a few units above.
//!
//! Overlapping platforms are resolved independently in slice order. Pushing
//! out of one platform may change the overlap with a later one in the same
//! pass; that is not re-checked.

use glam::Vec2;

use super::body::PhysicsBody;
use super::rect::Bounded;
use crate::clamp_non_negative;
use crate::consts::{REST_EPSILON, STICK_DISTANCE};

/// What happened while moving a body for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Horizontal motion was stopped by a wall
    pub blocked_x: bool,
    /// Landed on a platform via overlap
    pub landed: bool,
    /// Hit the underside of a platform while rising
    pub bumped_head: bool,
    /// Grounded by the sticking pass rather than an overlap
    pub stuck: bool,
}

/// Move `body` by `vel.x * scale` and push it out of any platform it enters
///
/// Velocity is left untouched; it is recomputed from input next frame.
pub fn resolve_horizontal<P: Bounded>(body: &mut PhysicsBody, platforms: &[P], scale: f32) -> bool {
    let dx = body.vel.x * scale;
    body.rect = body.rect.translated(Vec2::new(dx, 0.0));

    let mut blocked = false;
    for platform in platforms {
        let plat = platform.aabb();
        if !body.rect.overlaps(&plat) {
            continue;
        }
        if dx > 0.0 {
            body.rect.set_right(plat.left());
            blocked = true;
        } else if dx < 0.0 {
            body.rect.set_left(plat.right());
            blocked = true;
        }
    }
    blocked
}

/// Move `body` by `vel.y * scale` and land on / bump off platforms
///
/// Clears `on_ground` first; only a landing sets it again.
pub fn resolve_vertical<P: Bounded>(
    body: &mut PhysicsBody,
    platforms: &[P],
    scale: f32,
) -> CollisionResult {
    let dy = body.vel.y * scale;
    body.rect = body.rect.translated(Vec2::new(0.0, dy));
    body.on_ground = false;

    let mut result = CollisionResult::default();
    for platform in platforms {
        let plat = platform.aabb();
        if !body.rect.overlaps(&plat) {
            continue;
        }
        if body.vel.y > 0.0 {
            // Falling: feet onto the platform top
            body.rect.set_bottom(plat.top());
            body.vel.y = 0.0;
            body.on_ground = true;
            result.landed = true;
        } else if body.vel.y < 0.0 {
            // Rising: head against the underside
            body.rect.set_top(plat.bottom());
            body.vel.y = 0.0;
            result.bumped_head = true;
        }
    }
    result
}

/// Snap a body at rest onto a platform it is hovering just above
///
/// Only runs when the vertical pass didn't ground the body and vertical
/// velocity is effectively zero.
pub fn stick_to_ground<P: Bounded>(body: &mut PhysicsBody, platforms: &[P]) -> bool {
    if body.on_ground || body.vel.y.abs() >= REST_EPSILON {
        return false;
    }
    for platform in platforms {
        let plat = platform.aabb();
        if !body.rect.overlaps_x(&plat) {
            continue;
        }
        let gap = plat.top() - body.rect.bottom();
        if (0.0..=STICK_DISTANCE).contains(&gap) {
            body.rect.set_bottom(plat.top());
            body.on_ground = true;
            return true;
        }
    }
    false
}

/// Full per-frame resolution: horizontal, vertical, then sticking
pub fn move_and_collide<P: Bounded>(
    body: &mut PhysicsBody,
    platforms: &[P],
    scale: f32,
) -> CollisionResult {
    let blocked_x = resolve_horizontal(body, platforms, scale);
    let mut result = resolve_vertical(body, platforms, scale);
    result.blocked_x = blocked_x;
    result.stuck = stick_to_ground(body, platforms);
    result
}

/// Keep the body horizontally inside `[0, world_width]`
///
/// A world narrower than the body pins it at x = 0.
pub fn clamp_to_world(body: &mut PhysicsBody, world_width: f32) -> bool {
    let left = body.rect.left();
    let clamped = clamp_non_negative(left, world_width - body.rect.width());
    body.rect.set_left(clamped);
    clamped != left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Aabb;

    fn ground() -> Vec<Aabb> {
        vec![Aabb::new(0.0, 560.0, 1000.0, 40.0)]
    }

    fn body_at(x: f32, y: f32) -> PhysicsBody {
        PhysicsBody::new(Aabb::new(x, y, 40.0, 50.0))
    }

    #[test]
    fn test_landing_clamps_to_platform_top() {
        let platforms = ground();
        let mut body = body_at(100.0, 505.0);
        body.vel.y = 8.0;

        let result = move_and_collide(&mut body, &platforms, 1.0);
        assert!(result.landed);
        assert_eq!(body.rect.bottom(), 560.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn test_rising_bumps_head() {
        let platforms = vec![Aabb::new(0.0, 300.0, 200.0, 24.0)];
        let mut body = body_at(50.0, 330.0);
        body.vel.y = -12.0;

        let result = move_and_collide(&mut body, &platforms, 1.0);
        assert!(result.bumped_head);
        assert_eq!(body.rect.top(), 324.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_wall_blocks_moving_right() {
        let platforms = vec![Aabb::new(200.0, 0.0, 50.0, 600.0)];
        let mut body = body_at(158.0, 100.0);
        body.vel.x = 5.0;

        assert!(resolve_horizontal(&mut body, &platforms, 1.0));
        assert_eq!(body.rect.right(), 200.0);
        // Velocity survives the clamp
        assert_eq!(body.vel.x, 5.0);
    }

    #[test]
    fn test_wall_blocks_moving_left() {
        let platforms = vec![Aabb::new(0.0, 0.0, 50.0, 600.0)];
        let mut body = body_at(52.0, 100.0);
        body.vel.x = -5.0;

        assert!(resolve_horizontal(&mut body, &platforms, 1.0));
        assert_eq!(body.rect.left(), 50.0);
    }

    #[test]
    fn test_walking_on_platform_is_not_a_wall() {
        let platforms = ground();
        let mut body = body_at(100.0, 510.0);
        body.vel.x = 5.0;

        assert!(!resolve_horizontal(&mut body, &platforms, 1.0));
        assert_eq!(body.rect.left(), 105.0);
    }

    #[test]
    fn test_vertical_pass_clears_ground_flag_in_air() {
        let platforms = ground();
        let mut body = body_at(100.0, 100.0);
        body.on_ground = true;
        body.vel.y = 1.0;

        move_and_collide(&mut body, &platforms, 1.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_sticking_pass_snaps_hovering_body() {
        let platforms = ground();
        // Two units above the platform, no vertical motion
        let mut body = body_at(100.0, 508.0);

        let result = move_and_collide(&mut body, &platforms, 1.0);
        assert!(result.stuck);
        assert!(!result.landed);
        assert!(body.on_ground);
        assert_eq!(body.rect.bottom(), 560.0);
    }

    #[test]
    fn test_sticking_pass_ignores_distant_platform() {
        let platforms = ground();
        let mut body = body_at(100.0, 500.0);

        let result = move_and_collide(&mut body, &platforms, 1.0);
        assert!(!result.stuck);
        assert!(!body.on_ground);
        assert_eq!(body.rect.bottom(), 550.0);
    }

    #[test]
    fn test_sticking_pass_requires_horizontal_overlap() {
        let platforms = vec![Aabb::new(0.0, 560.0, 100.0, 40.0)];
        // Left edge exactly at the platform's right edge
        let mut body = body_at(100.0, 508.0);

        assert!(!stick_to_ground(&mut body, &platforms));
        assert!(!body.on_ground);
    }

    #[test]
    fn test_sticking_pass_skipped_while_moving() {
        let platforms = ground();
        let mut body = body_at(100.0, 508.0);
        body.vel.y = -0.5;

        assert!(!stick_to_ground(&mut body, &platforms));
    }

    #[test]
    fn test_resting_body_stays_grounded_at_zero_velocity() {
        let platforms = ground();
        let mut body = body_at(100.0, 510.0);

        for _ in 0..120 {
            body.vel.y = 0.0;
            move_and_collide(&mut body, &platforms, 1.0);
            assert!(body.on_ground);
            assert_eq!(body.rect.bottom(), 560.0);
        }
    }

    #[test]
    fn test_resting_body_stays_grounded_under_gravity() {
        let platforms = ground();
        let mut body = body_at(100.0, 510.0);

        for _ in 0..120 {
            body.apply_gravity(1.0);
            move_and_collide(&mut body, &platforms, 1.0);
            assert!(body.on_ground);
            assert_eq!(body.rect.bottom(), 560.0);
            assert_eq!(body.vel.y, 0.0);
        }
    }

    #[test]
    fn test_world_edges_clamp_body() {
        let mut body = body_at(-12.0, 100.0);
        assert!(clamp_to_world(&mut body, 1000.0));
        assert_eq!(body.rect.left(), 0.0);

        let mut body = body_at(975.0, 100.0);
        assert!(clamp_to_world(&mut body, 1000.0));
        assert_eq!(body.rect.right(), 1000.0);

        let mut body = body_at(300.0, 100.0);
        assert!(!clamp_to_world(&mut body, 1000.0));
        assert_eq!(body.rect.left(), 300.0);

        // Narrower than the body
        let mut body = body_at(10.0, 100.0);
        clamp_to_world(&mut body, 20.0);
        assert_eq!(body.rect.left(), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn falling_body_lands_exactly_on_top(
                plat_x in 0i32..500,
                plat_y in 100i32..600,
                plat_w in 60i32..400,
                offset in 0i32..20,
                gap in 0i32..9,
                fall_speed in 10i32..20,
            ) {
                let plat = Aabb::new(plat_x as f32, plat_y as f32, plat_w as f32, 24.0);
                // Body starts `gap` units above the platform and falls far enough to overlap
                let mut body = PhysicsBody::new(Aabb::new(
                    (plat_x + offset) as f32,
                    (plat_y - 50 - gap) as f32,
                    40.0,
                    50.0,
                ));
                body.vel.y = fall_speed as f32;

                move_and_collide(&mut body, &[plat], 1.0);

                prop_assert_eq!(body.rect.bottom(), plat.top());
                prop_assert_eq!(body.vel.y, 0.0);
                prop_assert!(body.on_ground);
            }
        }
    }
}
