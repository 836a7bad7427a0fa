use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use folio_core::rules::params_from_json;
use folio_core::*;
use serde_json::json;

fn clock() -> Arc<dyn Clock> {
    let friday = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 5, 12, 0, 0)
        .unwrap();
    Arc::new(FixedClock::new(friday))
}

fn friday_rule(name: &str, priority: i64) -> RuleConfig {
    RuleConfig::new(name, priority, params_from_json(json!({ "discountRate": 5 })))
}

#[test]
fn scenario_duplicate_priority_fails_build() {
    let config = DiscountConfig::new(vec![
        friday_rule("FridayRule", 5),
        RuleConfig::new(
            "BulkSameBookRule",
            5,
            params_from_json(json!({ "minBooks": 5, "discountRate": 40 })),
        ),
    ]);
    let err = RuleEngine::build(&config, clock()).unwrap_err();
    assert_eq!(
        err,
        EngineError::Config(ConfigError::DuplicatePriority {
            priority: 5,
            first: "FridayRule".to_string(),
            second: "BulkSameBookRule".to_string(),
        })
    );
}

#[test]
fn scenario_duplicate_name_fails_build() {
    let config =
        DiscountConfig::new(vec![friday_rule("FridayRule", 1), friday_rule("FridayRule", 2)]);
    let err = RuleEngine::build(&config, clock()).unwrap_err();
    assert_eq!(err.to_string(), "invalid config: duplicate rule name: FridayRule");
}

#[test]
fn scenario_unknown_rule_fails_build() {
    let config = DiscountConfig::new(vec![friday_rule("HolidayRule", 1)]);
    let err = RuleEngine::build(&config, clock()).unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(
        err.to_string(),
        "failed to create rule HolidayRule: unknown rule: HolidayRule"
    );
}

#[test]
fn scenario_disabled_rule_never_runs() {
    let mut config = DiscountConfig::default();
    for rule in &mut config.rules {
        if rule.name == "FridayRule" {
            rule.enabled = false;
        }
    }
    let engine = RuleEngine::build(&config, clock()).unwrap();

    let books = vec![Book::new("1", Money::from_cents(1000))];
    let discount = engine.calculate(CustomerType::New, &books).unwrap();
    assert!(discount.discount_amount.is_zero());
    assert!(discount.applied_rules.is_empty());
}

#[test]
fn scenario_invalid_params_name_the_rule() {
    let config = DiscountConfig::new(vec![RuleConfig::new(
        "VolumeDiscountRule",
        1,
        params_from_json(json!({ "ranges": [] })),
    )]);
    let err = RuleEngine::build(&config, clock()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid config: rule VolumeDiscountRule: ranges cannot be empty"
    );
}

#[test]
fn scenario_priority_order_not_list_order() {
    // Volume written first but runs last: on a Friday it never sees a book
    let defaults = DiscountConfig::default();
    let mut rules = defaults.rules.clone();
    rules.reverse();
    let engine = RuleEngine::build(&DiscountConfig::new(rules), clock()).unwrap();
    assert_eq!(
        engine.rule_names(),
        vec!["BulkSameBookRule", "FridayRule", "VolumeDiscountRule"]
    );

    let books = vec![
        Book::new("1", Money::from_cents(1000)),
        Book::new("2", Money::from_cents(1000)),
    ];
    let discount = engine.calculate(CustomerType::New, &books).unwrap();
    assert_eq!(discount.discount_amount.cents(), 100);
}
