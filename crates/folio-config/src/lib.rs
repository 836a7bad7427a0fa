//! # folio-config: Configuration Loading for Folio
//!
//! Turns a config file plus `FOLIO_*` environment variables into the values
//! the discount engine and the CLI need.
//!
//! ```text
//! FolioConfig::load(path)
//!     │
//!     ├── discount_config() ──► folio_core::DiscountConfig
//!     ├── clock()           ──► folio_core::SystemClock
//!     └── logging           ──► filter directives, json flag
//! ```
//!
//! Validation happens at load time, so a `FolioConfig` in hand always
//! builds an engine.

pub mod config;
pub mod error;

pub use config::{
    ClockSettings, FolioConfig, LoggingSettings, ENV_CONFIG, ENV_LOG, ENV_LOG_JSON,
    ENV_UTC_OFFSET_MINUTES,
};
pub use error::{LoadError, LoadResult};
