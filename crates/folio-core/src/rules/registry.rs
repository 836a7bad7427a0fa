//! Name → constructor lookup for rules.
//!
//! The registry is the only place that knows which concrete rule types
//! exist. Config refers to rules by name; the engine asks the registry to
//! turn each `(name, params)` pair into a live rule.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{ParamError, RegistryError};
use crate::rules::params::RuleParams;
use crate::rules::{BulkSameBookRule, DiscountRule, FridayRule, VolumeDiscountRule};

/// Builds one rule from its parameters.
pub type RuleFactory = fn(&RuleParams) -> Result<Box<dyn DiscountRule>, ParamError>;

fn create_bulk_same_book(params: &RuleParams) -> Result<Box<dyn DiscountRule>, ParamError> {
    Ok(Box::new(BulkSameBookRule::from_params(params)?))
}

fn create_friday(params: &RuleParams) -> Result<Box<dyn DiscountRule>, ParamError> {
    Ok(Box::new(FridayRule::from_params(params)?))
}

fn create_volume_discount(params: &RuleParams) -> Result<Box<dyn DiscountRule>, ParamError> {
    Ok(Box::new(VolumeDiscountRule::from_params(params)?))
}

#[derive(Clone, Default)]
pub struct RuleRegistry {
    factories: BTreeMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    /// A registry knowing the three built-in rules.
    pub fn with_builtin_rules() -> Self {
        let mut registry = RuleRegistry::new();
        registry.register(BulkSameBookRule::NAME, create_bulk_same_book);
        registry.register(FridayRule::NAME, create_friday);
        registry.register(VolumeDiscountRule::NAME, create_volume_discount);
        registry
    }

    /// Registers `factory` under `name`, replacing any earlier entry.
    pub fn register(&mut self, name: impl Into<String>, factory: RuleFactory) {
        let name = name.into();
        debug!(rule = %name, "Registering rule factory");
        self.factories.insert(name, factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, ascending.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(
        &self,
        name: &str,
        params: &RuleParams,
    ) -> Result<Box<dyn DiscountRule>, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownRule(name.to_string()))?;

        factory(params).map_err(|source| RegistryError::InvalidParameter {
            rule: name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
