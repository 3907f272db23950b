//! Horizontal scrolling camera
//!
//! The offset is a direct clamp of the target's centre, with no easing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;
use crate::clamp_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World x at the viewport's left edge
    pub offset_x: f32,
    pub viewport_width: f32,
}

impl Camera {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            offset_x: 0.0,
            viewport_width,
        }
    }

    /// Largest valid offset for a world of the given width
    pub fn max_offset(&self, world_width: f32) -> f32 {
        (world_width - self.viewport_width).max(0.0)
    }

    /// Centre on `target`, clamped to `[0, max(0, world_width - viewport_width)]`
    pub fn follow(&mut self, target: &Aabb, world_width: f32) {
        let desired = target.center().x - self.viewport_width / 2.0;
        self.offset_x = clamp_non_negative(desired, self.max_offset(world_width));
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
    }

    /// World rect to viewport coordinates
    pub fn to_screen(&self, rect: &Aabb) -> Aabb {
        rect.translated(Vec2::new(-self.offset_x, 0.0))
    }
}
