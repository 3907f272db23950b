//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (per level index)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or input-device dependencies

pub mod body;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod interact;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;
pub mod view;

pub use body::PhysicsBody;
pub use camera::Camera;
pub use clock::FrameClock;
pub use collision::{CollisionResult, move_and_collide};
pub use enemy::{Enemy, advance_enemies};
pub use interact::{AttackWindow, EnemyContact};
pub use level::{EnemySpawn, Level, LevelData, generate_level};
pub use rect::{Aabb, Bounded};
pub use state::{Coin, Facing, GameEvent, GamePhase, GameState, Platform, Player, PlayerPose};
pub use tick::{FrameInput, FrameResult, Telemetry, step};
pub use view::{DrawItem, Drawable, Sprite};
