//! Draw-list output for the rendering host
//!
//! Each live entity contributes one world-space box plus a sprite tag. The
//! host converts boxes with [`Camera::to_screen`](super::camera::Camera::to_screen)
//! and picks its own images from the tag.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::rect::{Aabb, Bounded};
use super::state::{Coin, Facing, GameState, Platform, Player, PlayerPose};

/// ID used for the player in draw lists (entity IDs start at 1)
pub const PLAYER_DRAW_ID: u32 = 0;

/// Enough state to choose a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Player { pose: PlayerPose, facing: Facing },
    Enemy { facing: Facing },
    Coin { frame: u8 },
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub id: u32,
    /// World space
    pub rect: Aabb,
    pub sprite: Sprite,
}

/// Has a bounding box and a draw state
pub trait Drawable: Bounded {
    fn draw_id(&self) -> u32;
    fn sprite(&self) -> Sprite;

    fn draw_item(&self) -> DrawItem {
        DrawItem {
            id: self.draw_id(),
            rect: self.aabb(),
            sprite: self.sprite(),
        }
    }
}

impl Drawable for Player {
    fn draw_id(&self) -> u32 {
        PLAYER_DRAW_ID
    }

    fn sprite(&self) -> Sprite {
        Sprite::Player {
            pose: self.pose,
            facing: self.facing,
        }
    }
}

impl Drawable for Enemy {
    fn draw_id(&self) -> u32 {
        self.id
    }

    fn sprite(&self) -> Sprite {
        Sprite::Enemy {
            facing: self.facing,
        }
    }
}

impl Drawable for Coin {
    fn draw_id(&self) -> u32 {
        self.id
    }

    fn sprite(&self) -> Sprite {
        Sprite::Coin { frame: self.frame }
    }
}

impl Drawable for Platform {
    fn draw_id(&self) -> u32 {
        self.id
    }

    fn sprite(&self) -> Sprite {
        Sprite::Platform
    }
}

impl GameState {
    /// Platforms, coins, enemies, then the player (back to front)
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let level = &self.level;
        let mut items =
            Vec::with_capacity(level.platforms.len() + level.coins.len() + level.enemies.len() + 1);
        items.extend(level.platforms.iter().map(Drawable::draw_item));
        items.extend(level.coins.iter().map(Drawable::draw_item));
        items.extend(level.enemies.iter().map(Drawable::draw_item));
        items.push(self.player.draw_item());
        items
    }

    /// Draw list restricted to items intersecting the viewport, in viewport
    /// coordinates
    pub fn visible_draw_list(&self) -> Vec<DrawItem> {
        let view = Aabb::new(
            self.camera.offset_x,
            0.0,
            self.camera.viewport_width,
            self.settings.viewport_height,
        );
        self.draw_list()
            .into_iter()
            .filter(|item| item.rect.overlaps(&view))
            .map(|item| DrawItem {
                rect: self.camera.to_screen(&item.rect),
                ..item
            })
            .collect()
    }
}
