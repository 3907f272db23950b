//! Procedural level generation
//!
//! `generate_level(index)` is pure: the RNG is reseeded from the index, so
//! regenerating a level (respawn, restart) always yields the same layout.
//!
//! Layout contract: every gap between consecutive platforms must be
//! crossable with one jump under `GRAVITY` / `PLAYER_JUMP_VELOCITY` /
//! `PLAYER_SPEED`. The constants below are chosen so the widest horizontal
//! gap stays under the jump reach and the highest rise under the jump apex
//! for every index (see `tests::gaps_are_jumpable`).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{Coin, Facing, Platform};
use crate::consts::*;

/// World length of level 0
pub const BASE_LEVEL_LENGTH: f32 = 2000.0;
/// Extra world length per level
pub const LEVEL_LENGTH_STEP: f32 = 160.0;
pub const BASE_PLATFORM_COUNT: u32 = 10;
/// One extra platform every this many levels
pub const PLATFORM_COUNT_STEP: u32 = 2;
/// x of the first platform
pub const FIRST_PLATFORM_X: f32 = 100.0;
/// Horizontal distance between platform origins never drops below this
pub const MIN_PLATFORM_STEP: f32 = 180.0;
/// Height of each staircase step
pub const PLATFORM_RISE: f32 = 32.0;
/// Staircase resets to the base height after this many platforms
pub const STAIRCASE_LENGTH: u32 = 4;
pub const MAX_X_JITTER: i32 = 20;
pub const MAX_Y_JITTER: i32 = 8;
/// Baseline platform height, 80 units above the viewport bottom
pub const BASE_PLATFORM_Y: f32 = VIEWPORT_HEIGHT - PLATFORM_HEIGHT - 80.0;
/// Used when a level has no platform to stand on
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(50.0, VIEWPORT_HEIGHT - 150.0);

const GENERATOR_SEED: u64 = 0x5EED_1E7E;

/// An enemy's starting box and patrol bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Top-left corner
    pub pos: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    pub facing: Facing,
}

/// Generated layout, before entities are instantiated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub index: u32,
    /// World width
    pub length: f32,
    /// Platform top-left corners
    pub platforms: Vec<Vec2>,
    /// Coin top-left corners
    pub coins: Vec<Vec2>,
    pub enemies: Vec<EnemySpawn>,
    /// Player top-left corner at level start
    pub spawn: Vec2,
}

/// A loaded level: exclusively owns its live entity sets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub length: f32,
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
}

impl Level {
    /// A level is complete once every coin is collected
    pub fn is_complete(&self) -> bool {
        self.coins.is_empty()
    }
}

/// World length for a level index (linear growth)
pub fn level_length(index: u32) -> f32 {
    BASE_LEVEL_LENGTH + LEVEL_LENGTH_STEP * index as f32
}

/// Platform count for a level index (stepwise growth)
pub fn platform_count(index: u32) -> u32 {
    BASE_PLATFORM_COUNT + index / PLATFORM_COUNT_STEP
}

fn level_seed(index: u32) -> u64 {
    (index as u64)
        .wrapping_mul(2_654_435_761)
        .wrapping_add(GENERATOR_SEED)
}

/// Generate the layout for `index`
pub fn generate_level(index: u32) -> LevelData {
    let mut rng = Pcg32::seed_from_u64(level_seed(index));

    let length = level_length(index);
    let count = platform_count(index);
    let step = ((length - 2.0 * FIRST_PLATFORM_X) / count as f32)
        .floor()
        .max(MIN_PLATFORM_STEP);

    let mut platforms = Vec::with_capacity(count as usize);
    let mut coins = Vec::new();
    let mut enemies = Vec::new();

    for j in 0..count {
        let jitter_x = rng.random_range(-MAX_X_JITTER..=MAX_X_JITTER) as f32;
        let jitter_y = rng.random_range(-MAX_Y_JITTER..=MAX_Y_JITTER) as f32;
        let x = FIRST_PLATFORM_X + j as f32 * step + jitter_x;
        let y = BASE_PLATFORM_Y - (j % STAIRCASE_LENGTH) as f32 * PLATFORM_RISE + jitter_y;
        platforms.push(Vec2::new(x, y));

        // Coin hovering over every other platform
        if j % 2 == 0 {
            coins.push(Vec2::new(
                x + ((PLATFORM_WIDTH - COIN_SIZE) / 2.0).floor(),
                y - COIN_SIZE - COIN_HOVER,
            ));
        }

        // Enemy on every fourth platform, starting with the second
        if j % 4 == 1 {
            let facing = if rng.random_bool(0.5) {
                Facing::Right
            } else {
                Facing::Left
            };
            enemies.push(EnemySpawn {
                pos: Vec2::new(
                    x + ((PLATFORM_WIDTH - ENEMY_WIDTH) / 2.0).floor(),
                    y - ENEMY_HEIGHT,
                ),
                min_x: x,
                max_x: x + PLATFORM_WIDTH - ENEMY_WIDTH,
                facing,
            });
        }
    }

    let spawn = spawn_point(&platforms);

    LevelData {
        index,
        length,
        platforms,
        coins,
        enemies,
        spawn,
    }
}

/// Player start: standing on the first platform, 10 units in
fn spawn_point(platforms: &[Vec2]) -> Vec2 {
    match platforms.first() {
        Some(first) => Vec2::new(first.x + 10.0, first.y - PLAYER_HEIGHT),
        None => {
            log::warn!("No spawn platform, using default spawn {:?}", DEFAULT_SPAWN);
            DEFAULT_SPAWN
        }
    }
}
