//! # Rule Configuration
//!
//! Which rules run, in what order, with which parameters.
//!
//! ## Ordering
//! ```text
//! priority   1  BulkSameBookRule     ─┐
//! priority  10  FridayRule            │  ascending: lower runs first
//! priority  20  VolumeDiscountRule   ─┘
//! ```
//!
//! Priorities must be unique across the whole list, disabled entries
//! included, so the order never depends on how the list was written.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ConfigError, ParamError};
use crate::rules::{
    params_from_json, BulkSameBookRule, FridayRule, RuleParams, VolumeDiscountRule,
};

// =============================================================================
// Rule Config
// =============================================================================

/// One configured rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Registry name of the rule.
    pub name: String,

    /// Disabled rules are validated but never instantiated.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Lower runs first.
    pub priority: i64,

    #[serde(default)]
    pub params: RuleParams,
}

fn default_enabled() -> bool {
    true
}

impl RuleConfig {
    pub fn new(name: impl Into<String>, priority: i64, params: RuleParams) -> Self {
        RuleConfig {
            name: name.into(),
            enabled: true,
            priority,
            params,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Checks params against the built-in schema for this rule's name.
    /// Names without a built-in schema pass.
    fn check_params(&self) -> Result<(), ParamError> {
        match self.name.as_str() {
            BulkSameBookRule::NAME => BulkSameBookRule::from_params(&self.params).map(drop),
            FridayRule::NAME => FridayRule::from_params(&self.params).map(drop),
            VolumeDiscountRule::NAME => VolumeDiscountRule::from_params(&self.params).map(drop),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Discount Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl DiscountConfig {
    pub fn new(rules: Vec<RuleConfig>) -> Self {
        DiscountConfig { rules }
    }

    /// Checks the whole list. The first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        let mut names = BTreeSet::new();
        let mut priorities: BTreeMap<i64, &str> = BTreeMap::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if !names.insert(rule.name.as_str()) {
                return Err(ConfigError::DuplicateName(rule.name.clone()));
            }
            if let Some(first) = priorities.insert(rule.priority, rule.name.as_str()) {
                return Err(ConfigError::DuplicatePriority {
                    priority: rule.priority,
                    first: first.to_string(),
                    second: rule.name.clone(),
                });
            }
            rule.check_params()
                .map_err(|source| ConfigError::InvalidParams {
                    rule: rule.name.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Sorts ascending by priority. Stable.
    pub fn sort(&mut self) {
        self.rules.sort_by_key(|rule| rule.priority);
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleConfig> {
        self.rules.iter().filter(|rule| rule.enabled)
    }
}

impl Default for DiscountConfig {
    /// The store's standard policy.
    fn default() -> Self {
        DiscountConfig {
            rules: vec![
                RuleConfig::new(
                    BulkSameBookRule::NAME,
                    1,
                    params_from_json(json!({
                        "minBooks": BulkSameBookRule::DEFAULT_MIN_BOOKS,
                        "discountRate": BulkSameBookRule::DEFAULT_DISCOUNT_RATE,
                    })),
                ),
                RuleConfig::new(
                    FridayRule::NAME,
                    10,
                    params_from_json(json!({
                        "discountRate": FridayRule::DEFAULT_DISCOUNT_RATE,
                    })),
                ),
                RuleConfig::new(
                    VolumeDiscountRule::NAME,
                    20,
                    params_from_json(json!({
                        "ranges": [
                            { "customerType": "new", "minBooks": 2, "maxBooks": 5, "discountRate": 20 },
                            { "customerType": "old", "minBooks": 2, "maxBooks": 5, "discountRate": 10 },
                            { "customerType": "old", "minBooks": 6, "maxBooks": 10, "discountRate": 5 },
                            { "customerType": "old", "minBooks": 11, "discountRate": 2 },
                        ]
                    })),
                ),
            ],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
