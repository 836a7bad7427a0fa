use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use folio_cli::commands::{calculate, check_config, quote, rules};
use folio_config::FolioConfig;

fn at(raw: &str) -> Option<DateTime<FixedOffset>> {
    Some(DateTime::parse_from_rfc3339(raw).unwrap())
}

fn monday() -> Option<DateTime<FixedOffset>> {
    at("2024-01-01T12:00:00Z")
}

fn friday() -> Option<DateTime<FixedOffset>> {
    at("2024-01-05T12:00:00Z")
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| panic!("not JSON ({e}): {output}"))
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn calculate_returns_response_for_valid_request() {
    let body = r#"{
        "customer_id": "c-42",
        "customer_type": "new",
        "cash_register_id": "till-1",
        "books": [
            { "id": "1", "price": 10.0 },
            { "id": "2", "price": 10.0 },
            { "id": "3", "price": 10.0 }
        ]
    }"#;
    let result = calculate::run(&FolioConfig::default(), body, monday());
    assert_eq!(result.exit_code, 0, "{}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["original_amount"], 30.0);
    assert_eq!(payload["discount_amount"], 6.0);
    assert_eq!(payload["final_amount"], 24.0);
}

#[test]
fn calculate_on_friday_uses_weekday_rule() {
    let body = r#"{ "customer_type": "old", "books": [ { "id": "1", "price": 10.0 } ] }"#;
    let result = calculate::run(&FolioConfig::default(), body, friday());
    assert_eq!(result.exit_code, 0);
    assert_eq!(parse_payload(&result.output)["discount_amount"], 0.5);
}

#[test]
fn calculate_rejects_bad_input_with_exit_1() {
    let cases = [
        "not json",
        r#"{ "customer_type": "vip", "books": [] }"#,
        r#"{ "customer_type": "new", "books": [ { "id": "", "price": 1.0 } ] }"#,
        r#"{ "customer_type": "new", "books": [ { "id": "1", "price": -2.5 } ] }"#,
    ];
    for body in cases {
        let result = calculate::run(&FolioConfig::default(), body, monday());
        assert_eq!(result.exit_code, 1, "body: {body}");
        assert!(parse_payload(&result.output)["error"].is_string());
    }
}

#[test]
fn calculate_reports_config_errors_with_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
[[rules]]
name = "LoyaltyRule"
priority = 1
"#,
    )
    .unwrap();
    // Loads fine: unknown names are only rejected when the engine is built
    let config = FolioConfig::load_with_env(Some(path), no_env).unwrap();

    let body = r#"{ "customer_type": "new", "books": [] }"#;
    let result = calculate::run(&config, body, monday());
    assert_eq!(result.exit_code, 2);
    assert_eq!(
        parse_payload(&result.output)["error"],
        "failed to create rule LoyaltyRule: unknown rule: LoyaltyRule"
    );
}

#[test]
fn quote_prints_breakdown() {
    let mut books: Vec<String> = (0..6).map(|_| "1=1000".to_string()).collect();
    books.push("2=2000".to_string());
    books.push("3=3000".to_string());

    let result = quote::run(&FolioConfig::default(), "old", &books, monday());
    assert_eq!(result.exit_code, 0, "{}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["cart_amount"], 11000);
    assert_eq!(payload["discount_amount"], 1700);
    assert_eq!(payload["total_cost"], 9300);
    assert_eq!(payload["applied_rules"][0]["rule_name"], "BulkSameBookRule");
    assert_eq!(payload["applied_rules"][1]["rule_name"], "VolumeDiscountRule");
    assert_eq!(payload["outcome"]["kind"], "rules_exhausted");
}

#[test]
fn quote_rejects_malformed_books() {
    let result = quote::run(&FolioConfig::default(), "new", &["1:1000".to_string()], monday());
    assert_eq!(result.exit_code, 1);

    let result = quote::run(&FolioConfig::default(), "regular", &[], monday());
    assert_eq!(result.exit_code, 1);
}

#[test]
fn rules_prints_sorted_toml() {
    let result = rules::run(&FolioConfig::default());
    assert_eq!(result.exit_code, 0);

    let bulk = result.output.find("BulkSameBookRule").unwrap();
    let friday = result.output.find("FridayRule").unwrap();
    let volume = result.output.find("VolumeDiscountRule").unwrap();
    assert!(bulk < friday && friday < volume);

    let reparsed: FolioConfig = toml_round_trip(&result.output);
    assert_eq!(reparsed.rules.len(), 3);
}

fn toml_round_trip(text: &str) -> FolioConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rendered.toml");
    std::fs::write(&path, text).unwrap();
    FolioConfig::load_with_env(Some(path), no_env).unwrap()
}

#[test]
fn check_config_lists_rule_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.json");
    std::fs::write(
        &path,
        r#"{
            "clock": { "utc_offset_minutes": 0 },
            "rules": [
                { "name": "VolumeDiscountRule", "priority": 5, "params": { "ranges": [
                    { "customerType": "old", "minBooks": 1, "discountRate": 1 }
                ] } },
                { "name": "FridayRule", "priority": 1, "enabled": false, "params": { "discountRate": 5 } }
            ]
        }"#,
    )
    .unwrap();
    let config = FolioConfig::load_with_env(Some(path), no_env).unwrap();

    let result = check_config::run(&config);
    assert_eq!(result.exit_code, 0, "{}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["rules"], serde_json::json!(["VolumeDiscountRule"]));
    assert_eq!(payload["disabled"], serde_json::json!(["FridayRule"]));
}
