//! Typed reads out of the untyped rule parameter bag.
//!
//! The same readers back both `DiscountConfig::validate` and the registry
//! factories, so a config that validates is a config that builds.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ParamError, ParamResult};
use crate::types::DiscountRate;

/// Named parameters of one rule, exactly as they arrived from config.
pub type RuleParams = BTreeMap<String, Value>;

/// Builds a `RuleParams` from a JSON object literal. Non-objects give an
/// empty bag.
pub fn params_from_json(value: Value) -> RuleParams {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => RuleParams::new(),
    }
}

pub(crate) fn required<'a>(value: Option<&'a Value>, param: &str) -> ParamResult<&'a Value> {
    match value {
        None | Some(Value::Null) => Err(ParamError::Missing {
            param: param.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

/// Reads an integer. Floats, strings and booleans are rejected even if they
/// look like a whole number.
pub(crate) fn integer(value: &Value, param: &str) -> ParamResult<i64> {
    value.as_i64().ok_or_else(|| ParamError::WrongType {
        param: param.to_string(),
        expected: "an integer",
    })
}

/// Reads a non-negative integer as a book count.
pub(crate) fn count(value: &Value, param: &str) -> ParamResult<usize> {
    let raw = integer(value, param)?;
    usize::try_from(raw).map_err(|_| ParamError::Negative {
        param: param.to_string(),
        value: raw,
    })
}

/// Reads an integer percentage in 0..=100.
pub(crate) fn rate(value: &Value, param: &str) -> ParamResult<DiscountRate> {
    let raw = integer(value, param)?;
    u8::try_from(raw)
        .ok()
        .and_then(DiscountRate::new)
        .ok_or_else(|| ParamError::OutOfRange {
            param: param.to_string(),
            value: raw,
            min: 0,
            max: DiscountRate::MAX as i64,
        })
}

pub(crate) fn required_count(params: &RuleParams, param: &str) -> ParamResult<usize> {
    count(required(params.get(param), param)?, param)
}

pub(crate) fn required_rate(params: &RuleParams, param: &str) -> ParamResult<DiscountRate> {
    rate(required(params.get(param), param)?, param)
}
