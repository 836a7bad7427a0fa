use folio_config::FolioConfig;

use super::{CommandResult, EXIT_FAILED};

/// The effective configuration, rules sorted by priority, as TOML.
pub fn run(config: &FolioConfig) -> CommandResult {
    match config.render_toml() {
        Ok(toml) => CommandResult::success(toml),
        Err(error) => CommandResult::failure(EXIT_FAILED, error),
    }
}
