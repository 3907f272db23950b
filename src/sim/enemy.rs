//! Enemy patrol
//!
//! Every enemy runs the same two-state machine (moving left / moving right)
//! and reverses when a step would leave its patrol bounds. Enemies only
//! leave the level through defeat; there is no terminal patrol state.

use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::level::EnemySpawn;
use super::rect::{Aabb, Bounded};
use super::state::Facing;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: PhysicsBody,
    /// Current patrol direction (also the sprite facing)
    pub facing: Facing,
    pub patrol_min: f32,
    pub patrol_max: f32,
    /// Units per frame
    pub speed: f32,
}

impl Enemy {
    pub fn new(id: u32, rect: Aabb, patrol_min: f32, patrol_max: f32, facing: Facing) -> Self {
        let mut body = PhysicsBody::new(rect);
        // Grounded on its host platform for its whole life
        body.on_ground = true;
        let patrol_max = patrol_max.max(patrol_min);
        body.rect.pos.x = body.rect.pos.x.max(patrol_min).min(patrol_max);
        Self {
            id,
            body,
            facing,
            patrol_min,
            patrol_max,
            speed: ENEMY_SPEED,
        }
    }

    pub fn from_spawn(id: u32, spawn: &EnemySpawn) -> Self {
        Self::new(
            id,
            Aabb::new(spawn.pos.x, spawn.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT),
            spawn.min_x,
            spawn.max_x,
            spawn.facing,
        )
    }

    pub fn rect(&self) -> &Aabb {
        &self.body.rect
    }

    /// Advance one frame; reverse and clamp on leaving the bounds
    pub fn patrol(&mut self, scale: f32) {
        self.body.vel.x = self.facing.sign() * self.speed;
        let x = self.body.rect.left() + self.body.vel.x * scale;
        if x < self.patrol_min || x > self.patrol_max {
            self.facing = self.facing.flipped();
        }
        self.body.rect.set_left(x.max(self.patrol_min).min(self.patrol_max));
    }
}

impl Bounded for Enemy {
    fn aabb(&self) -> Aabb {
        self.body.rect
    }
}

/// Advance every live enemy one frame
pub fn advance_enemies(enemies: &mut [Enemy], scale: f32) {
    for enemy in enemies {
        enemy.patrol(scale);
    }
}
