//! # Folio Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOLIO_UTC_OFFSET_MINUTES=180                                       │
//! │     FOLIO_LOG=debug   FOLIO_LOG_JSON=1                                 │
//! │                                                                         │
//! │  2. Config File                                                        │
//! │     --config PATH, else FOLIO_CONFIG, else                             │
//! │     ~/.config/folio/config.toml (Linux)                                │
//! │     ~/Library/Application Support/com.folio.folio/config.toml (macOS) │
//! │     `.json` files are read as JSON, anything else as TOML              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     DiscountConfig::default(), host local offset, "info,folio=debug"  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [clock]
//! utc_offset_minutes = 180
//!
//! [logging]
//! filter = "info,folio=debug"
//! json = false
//!
//! [[rules]]
//! name = "BulkSameBookRule"
//! priority = 1
//! params = { minBooks = 5, discountRate = 40 }
//!
//! [[rules]]
//! name = "FridayRule"
//! priority = 10
//! enabled = false
//! params = { discountRate = 5 }
//! ```
//!
//! A file with no `[[rules]]` keeps the built-in rule set.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use folio_core::{DiscountConfig, RuleConfig, SystemClock};

use crate::error::{LoadError, LoadResult};

/// Path of the config file, overriding the platform default.
pub const ENV_CONFIG: &str = "FOLIO_CONFIG";
/// Minutes east of UTC used to decide the weekday.
pub const ENV_UTC_OFFSET_MINUTES: &str = "FOLIO_UTC_OFFSET_MINUTES";
/// Log filter directives, same syntax as `RUST_LOG`.
pub const ENV_LOG: &str = "FOLIO_LOG";
/// `1`/`true` for JSON log lines.
pub const ENV_LOG_JSON: &str = "FOLIO_LOG_JSON";

// =============================================================================
// Clock Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Minutes east of UTC. Host local offset when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl ClockSettings {
    pub fn system_clock(&self) -> LoadResult<SystemClock> {
        match self.utc_offset_minutes {
            None => Ok(SystemClock::local()),
            Some(minutes) => SystemClock::with_offset_minutes(minutes)
                .ok_or(LoadError::InvalidClockOffset { minutes }),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives. `RUST_LOG` still wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// One JSON object per line instead of the human format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info,folio=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
            json: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub clock: ClockSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    /// Empty means "use the built-in rules".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleConfig>,
}

impl FolioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LoadResult<Self> {
        Self::load_with_env(config_path, |var| std::env::var(var).ok())
    }

    /// Same as `load`, reading environment variables through `env`.
    ///
    /// A path given explicitly (argument or `FOLIO_CONFIG`) must exist. The
    /// platform default path is only read if it exists.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> LoadResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path.or_else(|| env(ENV_CONFIG).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads one file. `.json` is parsed as JSON, anything else as TOML.
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let parsed: Result<FolioConfig, String> = if is_json {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            toml::from_str(&contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| LoadError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Checks the clock offset and the effective rule list.
    pub fn validate(&self) -> LoadResult<()> {
        self.clock.system_clock()?;
        self.discount_config().validate()?;
        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> LoadResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = env(ENV_UTC_OFFSET_MINUTES) {
            let minutes = raw.trim().parse::<i32>().map_err(|_| LoadError::InvalidEnv {
                var: ENV_UTC_OFFSET_MINUTES.to_string(),
                value: raw.clone(),
            })?;
            debug!(minutes, "Overriding clock offset from environment");
            self.clock.utc_offset_minutes = Some(minutes);
        }

        if let Some(filter) = env(ENV_LOG) {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.logging.filter = filter;
        }

        if let Some(raw) = env(ENV_LOG_JSON) {
            self.logging.json = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(LoadError::InvalidEnv {
                        var: ENV_LOG_JSON.to_string(),
                        value: raw,
                    })
                }
            };
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "folio", "folio")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The rule list the engine should run: the file's rules, or the
    /// built-in set when the file has none.
    pub fn discount_config(&self) -> DiscountConfig {
        if self.rules.is_empty() {
            DiscountConfig::default()
        } else {
            DiscountConfig::new(self.rules.clone())
        }
    }

    pub fn clock(&self) -> LoadResult<SystemClock> {
        self.clock.system_clock()
    }

    /// The effective configuration as TOML, rules sorted by priority.
    pub fn render_toml(&self) -> LoadResult<String> {
        let mut rules = self.discount_config();
        rules.sort();

        let effective = FolioConfig {
            clock: self.clock.clone(),
            logging: self.logging.clone(),
            rules: rules
                .rules
                .into_iter()
                .map(|mut rule| {
                    rule.params = rule
                        .params
                        .into_iter()
                        .filter(|(_, value)| !value.is_null())
                        .map(|(key, value)| (key, strip_nulls(value)))
                        .collect();
                    rule
                })
                .collect(),
        };

        toml::to_string_pretty(&effective).map_err(|e| LoadError::Render(e.to_string()))
    }
}

/// TOML has no null. An absent key means the same thing in every rule
/// schema, so nulls are dropped before rendering.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.logging.filter, "info,folio=debug");
        assert!(!config.logging.json);
        assert_eq!(config.discount_config(), DiscountConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml_with_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.toml",
            r#"
[clock]
utc_offset_minutes = 180

[[rules]]
name = "FridayRule"
priority = 10
params = { discountRate = 7 }

[[rules]]
name = "BulkSameBookRule"
priority = 1
params = { minBooks = 3, discountRate = 50 }
"#,
        );

        let config = FolioConfig::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.clock.utc_offset_minutes, Some(180));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[1].params["minBooks"], serde_json::json!(3));
        assert!(config.rules.iter().all(|rule| rule.enabled));
    }

    #[test]
    fn test_load_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.json",
            r#"{
                "logging": { "json": true },
                "rules": [
                    { "name": "VolumeDiscountRule", "priority": 1, "params": { "ranges": [
                        { "customerType": "new", "minBooks": 1, "maxBooks": null, "discountRate": 3 }
                    ] } }
                ]
            }"#,
        );

        let config = FolioConfig::load_with_env(Some(path), no_env).unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "info,folio=debug");
        assert_eq!(config.discount_config().rules[0].name, "VolumeDiscountRule");
    }

    #[test]
    fn test_file_without_rules_keeps_builtin_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.toml", "[logging]\nfilter = \"warn\"\n");

        let config = FolioConfig::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.discount_config(), DiscountConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.toml", "[clock]\nutc_offset_minutes = 60\n");
        let env = env_from(&[
            (ENV_CONFIG, path.to_str().unwrap()),
            (ENV_UTC_OFFSET_MINUTES, "-300"),
            (ENV_LOG, "debug"),
            (ENV_LOG_JSON, "true"),
        ]);

        let config = FolioConfig::load_with_env(None, env).unwrap();
        assert_eq!(config.clock.utc_offset_minutes, Some(-300));
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_bad_env_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.toml", "");

        let err = FolioConfig::load_with_env(
            Some(path.clone()),
            env_from(&[(ENV_UTC_OFFSET_MINUTES, "east")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidEnv { ref var, .. } if var == ENV_UTC_OFFSET_MINUTES
        ));

        let err =
            FolioConfig::load_with_env(Some(path.clone()), env_from(&[(ENV_LOG_JSON, "maybe")]))
                .unwrap_err();
        assert!(matches!(err, LoadError::InvalidEnv { .. }));

        let err = FolioConfig::load_with_env(
            Some(path),
            env_from(&[(ENV_UTC_OFFSET_MINUTES, "1440")]),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidClockOffset { minutes: 1440 }));
    }

    #[test]
    fn test_invalid_rules_report_rule_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.toml",
            r#"
[[rules]]
name = "FridayRule"
priority = 1
params = { discountRate = 140 }
"#,
        );

        let err = FolioConfig::load_with_env(Some(path), no_env).unwrap_err();
        assert!(err.is_rule_error());
        assert_eq!(
            err.to_string(),
            "invalid config: rule FridayRule: discountRate must be between 0 and 100, got 140"
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FolioConfig::load_with_env(Some(dir.path().join("absent.toml")), no_env)
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.toml", "[[rules]\nname = ");
        let err = FolioConfig::load_with_env(Some(path), no_env).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_render_toml_round_trips() {
        let mut config = FolioConfig::default();
        config.rules = DiscountConfig::default().rules;
        config.rules.reverse();
        config.rules[0]
            .params
            .insert("unused".to_string(), Value::Null);

        let rendered = config.render_toml().unwrap();
        let reparsed: FolioConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.discount_config(), DiscountConfig::default());
    }
}
