//! Game settings and rule policies
//!
//! Loaded from a JSON file by the host; every field falls back to its
//! default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// What happens to the player after a non-lethal enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Teleport back to the level's spawn point
    #[default]
    Respawn,
    /// Nudge the player away from the enemy by `distance` units
    Knockback { distance: f32 },
}

impl HitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPolicy::Respawn => "respawn",
            HitPolicy::Knockback { .. } => "knockback",
        }
    }
}

/// When score and lives go back to their starting values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsReset {
    /// Only on an explicit restart from GameOver/GameWon
    #[default]
    OnRestart,
    /// Every time a level is loaded (including advancing to the next one)
    OnLevelLoad,
}

impl StatsReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsReset::OnRestart => "on_restart",
            StatsReset::OnLevelLoad => "on_level_load",
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Rules ===
    /// Number of levels before the game is won
    pub level_count: u32,
    /// Lives at the start of a session
    pub starting_lives: u32,
    /// Distance below the viewport bottom that counts as falling off
    pub fall_margin: f32,
    pub hit_policy: HitPolicy,
    pub stats_reset: StatsReset,

    // === Timers (frames) ===
    /// Invulnerability after a non-lethal hit
    pub hit_invulnerability_frames: u32,
    /// Pause between clearing a level and loading the next
    pub level_transition_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            level_count: LEVEL_COUNT,
            starting_lives: STARTING_LIVES,
            fall_margin: FALL_MARGIN,
            hit_policy: HitPolicy::Respawn,
            stats_reset: StatsReset::OnRestart,

            hit_invulnerability_frames: 45,
            level_transition_frames: 30,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.viewport_width > 0.0) {
            return Err(invalid("viewport_width", "must be positive"));
        }
        if !(self.viewport_height > 0.0) {
            return Err(invalid("viewport_height", "must be positive"));
        }
        if self.level_count == 0 {
            return Err(invalid("level_count", "must be at least 1"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if !(self.fall_margin >= 0.0) {
            return Err(invalid("fall_margin", "must not be negative"));
        }
        if let HitPolicy::Knockback { distance } = self.hit_policy {
            if !distance.is_finite() || distance < 0.0 {
                return Err(invalid("hit_policy", "knockback distance must be finite and >= 0"));
            }
        }
        if self.level_transition_frames == 0 {
            return Err(invalid("level_transition_frames", "must be at least 1"));
        }
        Ok(())
    }

    /// World-space y below which the player is considered lost
    pub fn fall_limit(&self) -> f32 {
        self.viewport_height + self.fall_margin
    }
}

fn invalid(field: &'static str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
