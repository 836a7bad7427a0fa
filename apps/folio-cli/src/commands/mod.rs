//! One module per subcommand. Each `run` takes an already-loaded
//! `FolioConfig` and returns a `CommandResult`, so tests call them
//! directly without touching the process environment.

pub mod calculate;
pub mod check_config;
pub mod quote;
pub mod rules;

use std::fmt::Display;
use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use folio_config::FolioConfig;
use folio_core::dto::ErrorResponse;
use folio_core::{Clock, EngineError, FixedClock, RuleEngine, ServiceError};

pub const EXIT_OK: u8 = 0;
/// The input was rejected: bad JSON, unknown customer type, invalid book.
pub const EXIT_REJECTED: u8 = 1;
/// The configuration could not be loaded or does not build an engine.
pub const EXIT_CONFIG: u8 = 2;
/// A rule failed for a reason other than bad input.
pub const EXIT_FAILED: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_OK,
            output: output.into(),
        }
    }

    /// A JSON success payload.
    pub fn json<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(output) => Self::success(output),
            Err(error) => Self::failure(EXIT_FAILED, error),
        }
    }

    /// An `ErrorResponse` payload.
    pub fn failure(exit_code: u8, error: impl Display) -> Self {
        let payload = ErrorResponse::new(error);
        let output = serde_json::to_string(&payload).unwrap_or_else(|_| {
            let escaped = payload.error.replace('\\', "\\\\").replace('"', "\\\"");
            format!("{{\"error\":\"{escaped}\"}}")
        });
        Self { exit_code, output }
    }

    pub fn from_engine_error(error: &EngineError) -> Self {
        let exit_code = if error.is_client_error() {
            EXIT_REJECTED
        } else if error.is_config_error() {
            EXIT_CONFIG
        } else {
            EXIT_FAILED
        };
        Self::failure(exit_code, error)
    }

    pub fn from_service_error(error: &ServiceError) -> Self {
        match error {
            ServiceError::Validation(_) => Self::failure(EXIT_REJECTED, error),
            ServiceError::Engine(inner) => Self::from_engine_error(inner),
        }
    }
}

/// Reads a file, or stdin for `-`.
pub fn read_input(source: &str) -> Result<String, CommandResult> {
    let read = if source == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body).map(|_| body)
    } else {
        std::fs::read_to_string(source)
    };

    read.map_err(|error| {
        CommandResult::failure(EXIT_REJECTED, format!("failed to read request {source}: {error}"))
    })
}

/// The clock for one invocation: pinned by `--at`, else the configured one.
pub fn clock_for(
    config: &FolioConfig,
    at: Option<DateTime<FixedOffset>>,
) -> Result<Arc<dyn Clock>, CommandResult> {
    match at {
        Some(at) => Ok(Arc::new(FixedClock::new(at))),
        None => config
            .clock()
            .map(|clock| Arc::new(clock) as Arc<dyn Clock>)
            .map_err(|error| CommandResult::failure(EXIT_CONFIG, error)),
    }
}

pub fn build_engine(
    config: &FolioConfig,
    at: Option<DateTime<FixedOffset>>,
) -> Result<RuleEngine, CommandResult> {
    let clock = clock_for(config, at)?;
    RuleEngine::build(&config.discount_config(), clock)
        .map_err(|error| CommandResult::from_engine_error(&error))
}
