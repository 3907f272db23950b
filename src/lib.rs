//! Sidescroller - a 2D side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state)
//! - `settings`: Data-driven policies and viewport configuration
//! - `error`: Errors for the few fallible edges (settings loading)
//!
//! Rendering, audio and input polling are left to the host. The host samples
//! a [`sim::FrameInput`] each frame, calls [`sim::step`], and draws whatever
//! [`sim::GameState::draw_list`] hands back, offset by the camera.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{HitPolicy, Settings, StatsReset};

/// Game configuration constants
///
/// Kinematic values are per frame at the nominal 60 Hz rate.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame time the simulation will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport defaults
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Terminal fall speed (units/frame)
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Jump impulse (negative is up)
    pub const PLAYER_JUMP_VELOCITY: f32 = -12.0;
    /// Horizontal run speed (units/frame), no inertia
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Frames an attack stays active
    pub const ATTACK_DURATION: u32 = 15;
    pub const STARTING_LIVES: u32 = 3;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = 1.5;

    /// Coin hitbox
    pub const COIN_SIZE: f32 = 24.0;
    /// Gap between a coin's bottom and its platform's top
    pub const COIN_HOVER: f32 = 10.0;

    /// Platform tile
    pub const PLATFORM_WIDTH: f32 = 160.0;
    pub const PLATFORM_HEIGHT: f32 = 24.0;

    /// Number of generated levels
    pub const LEVEL_COUNT: u32 = 30;

    /// How far below the viewport the player may fall before losing a life
    pub const FALL_MARGIN: f32 = 300.0;

    /// Sticking pass tolerances
    pub const REST_EPSILON: f32 = 1e-3;
    pub const STICK_DISTANCE: f32 = 3.0;
}

/// Clamp `value` into `[0, max(0, upper)]`
///
/// Unlike `f32::clamp` this never panics when the range is inverted.
#[inline]
pub fn clamp_non_negative(value: f32, upper: f32) -> f32 {
    value.min(upper.max(0.0)).max(0.0)
}
