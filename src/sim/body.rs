//! Kinematic body shared by the player and enemies
//!
//! Vertical motion accumulates gravity; horizontal motion has no inertia and
//! is overwritten from intent every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;
use crate::consts::*;

/// Position, velocity and ground contact for one entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub rect: Aabb,
    /// Units per frame
    pub vel: Vec2,
    /// Re-derived by the collision resolver every frame
    pub on_ground: bool,
}

impl PhysicsBody {
    pub fn new(rect: Aabb) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Add one frame of gravity (scaled), capped at terminal velocity
    pub fn apply_gravity(&mut self, scale: f32) {
        self.vel.y = (self.vel.y + GRAVITY * scale).min(MAX_FALL_SPEED);
    }

    /// Set horizontal velocity directly from intent
    pub fn set_intent(&mut self, vx: f32) {
        self.vel.x = vx;
    }

    /// Start a jump if grounded. Returns whether the jump happened.
    pub fn try_jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = PLAYER_JUMP_VELOCITY;
        self.on_ground = false;
        true
    }

    /// Move the top-left corner and clear all motion state
    pub fn reset_to(&mut self, pos: Vec2) {
        self.rect.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> PhysicsBody {
        PhysicsBody::new(Aabb::new(0.0, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut b = body();
        b.apply_gravity(1.0);
        assert_eq!(b.vel.y, GRAVITY);
        b.apply_gravity(1.0);
        assert_eq!(b.vel.y, GRAVITY * 2.0);
    }

    #[test]
    fn test_gravity_terminal_velocity() {
        let mut b = body();
        for _ in 0..200 {
            b.apply_gravity(1.0);
        }
        assert_eq!(b.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut b = body();
        assert!(!b.try_jump());
        assert_eq!(b.vel.y, 0.0);

        b.on_ground = true;
        assert!(b.try_jump());
        assert_eq!(b.vel.y, PLAYER_JUMP_VELOCITY);
        assert!(!b.on_ground);

        // No double jump
        assert!(!b.try_jump());
    }

    #[test]
    fn test_intent_has_no_inertia() {
        let mut b = body();
        b.set_intent(PLAYER_SPEED);
        assert_eq!(b.vel.x, PLAYER_SPEED);
        b.set_intent(0.0);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_reset_clears_motion() {
        let mut b = body();
        b.vel = Vec2::new(3.0, -7.0);
        b.on_ground = true;
        b.reset_to(Vec2::new(100.0, 200.0));
        assert_eq!(b.rect.pos, Vec2::new(100.0, 200.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.on_ground);
    }
}
