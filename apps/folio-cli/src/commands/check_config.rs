use serde::Serialize;

use folio_config::FolioConfig;

use super::{build_engine, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    status: &'static str,
    rules: Vec<&'a str>,
    disabled: Vec<&'a str>,
}

/// Builds the engine exactly as `calculate` would and reports the order
/// rules will run in.
pub fn run(config: &FolioConfig) -> CommandResult {
    let engine = match build_engine(config, None) {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let discount_config = config.discount_config();
    let report = ConfigReport {
        status: "ok",
        rules: engine.rule_names(),
        disabled: discount_config
            .rules
            .iter()
            .filter(|rule| !rule.enabled)
            .map(|rule| rule.name.as_str())
            .collect(),
    };
    CommandResult::json(&report)
}
