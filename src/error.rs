//! Error types for the fallible edges of the crate.
//!
//! The simulation itself never fails: bad positions clamp, missing spawn
//! platforms fall back to a default. Only loading configuration can go wrong.

use std::io;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
