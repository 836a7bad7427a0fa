//! # Load Errors
//!
//! Everything that can go wrong between a config file on disk and a
//! validated `FolioConfig`.

use std::path::PathBuf;
use thiserror::Error;

use folio_core::ConfigError;

/// Result type alias for config loading.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML/JSON for this schema.
    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The rule list failed validation.
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),

    /// `clock.utc_offset_minutes` is outside ±1439.
    #[error("invalid clock offset: {minutes} minutes")]
    InvalidClockOffset { minutes: i32 },

    /// An environment variable held an unusable value.
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },

    /// The effective config could not be written back out.
    #[error("failed to render config: {0}")]
    Render(String),
}

impl LoadError {
    /// Returns true if the rules themselves are wrong, as opposed to the
    /// file being unreadable.
    pub fn is_rule_error(&self) -> bool {
        matches!(self, LoadError::Invalid(_))
    }
}
