//! # Wire Types
//!
//! Request and response shapes for callers that speak JSON in major
//! currency units (`10.99`), not cents.
//!
//! ```text
//! DiscountRequest ──► customer_type() ──► CustomerType
//!        │
//!        └──────────► books() ──► Vec<Book>   (price × 100, rounded)
//!
//! Discount ──► DiscountResponse               (cents ÷ 100)
//! ```
//!
//! Conversion happens only here. Everything behind this module is cents.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Book, CustomerType, Discount};
use crate::validation::{validate_major_amount, ValidationResult};

/// One book as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookDto {
    pub id: String,
    /// Major units, e.g. `10.99`.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRequest {
    /// Carried for the caller's records; not used by any rule.
    #[serde(default)]
    pub customer_id: Option<String>,
    pub customer_type: String,
    /// Carried for the caller's records; not used by any rule.
    #[serde(default)]
    pub cash_register_id: Option<String>,
    #[serde(default)]
    pub books: Vec<BookDto>,
}

impl DiscountRequest {
    /// Parses `customer_type`, case-insensitively.
    pub fn customer_type(&self) -> ValidationResult<CustomerType> {
        self.customer_type.parse()
    }

    /// Converts every price to cents. Ids are passed through untouched and
    /// checked by the engine.
    pub fn books(&self) -> ValidationResult<Vec<Book>> {
        self.books
            .iter()
            .enumerate()
            .map(|(index, book)| {
                let price = cents_from_major(book.price, &format!("books[{index}].price"))?;
                Ok(Book::new(book.id.clone(), price))
            })
            .collect()
    }
}

/// Major units to cents, rounding half away from zero.
pub fn cents_from_major(amount: f64, field: &str) -> ValidationResult<Money> {
    validate_major_amount(amount, field)?;
    Ok(Money::from_cents((amount * 100.0).round() as i64))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountResponse {
    pub original_amount: f64,
    /// Fraction of the cart taken off, `0.2` for 20%.
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
}

impl From<&Discount> for DiscountResponse {
    fn from(discount: &Discount) -> Self {
        DiscountResponse {
            original_amount: discount.cart_amount.to_major(),
            discount_percent: discount.discount_percent,
            discount_amount: discount.discount_amount.to_major(),
            final_amount: discount.total_cost.to_major(),
        }
    }
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        DiscountResponse::from(&discount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::CalculationOutcome;

    fn request(json: &str) -> DiscountRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_cents_from_major_rounds() {
        assert_eq!(cents_from_major(10.99, "p").unwrap().cents(), 1099);
        assert_eq!(cents_from_major(0.1 + 0.2, "p").unwrap().cents(), 30);
        assert_eq!(cents_from_major(19.999, "p").unwrap().cents(), 2000);
        assert_eq!(cents_from_major(0.0, "p").unwrap().cents(), 0);
        assert_eq!(cents_from_major(-1.5, "p").unwrap().cents(), -150);
    }

    #[test]
    fn test_cents_from_major_rejects_non_finite() {
        let err = cents_from_major(f64::NAN, "books[0].price").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert!(cents_from_major(f64::NEG_INFINITY, "p").is_err());
    }

    #[test]
    fn test_request_parsing() {
        let req = request(
            r#"{
                "customer_id": "c-1",
                "customer_type": "Old",
                "cash_register_id": "till-4",
                "books": [ { "id": "1", "price": 10.99 }, { "id": "2", "price": 5 } ]
            }"#,
        );
        assert_eq!(req.customer_type().unwrap(), CustomerType::Old);
        assert_eq!(
            req.books().unwrap(),
            vec![
                Book::new("1", Money::from_cents(1099)),
                Book::new("2", Money::from_cents(500)),
            ]
        );
    }

    #[test]
    fn test_request_optional_fields() {
        let req = request(r#"{ "customer_type": "new" }"#);
        assert_eq!(req.customer_id, None);
        assert!(req.books().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_customer_type() {
        let req = request(r#"{ "customer_type": "vip", "books": [] }"#);
        assert_eq!(
            req.customer_type().unwrap_err().to_string(),
            r#"customer_type must be one of ["new", "old"], got 'vip'"#
        );
    }

    #[test]
    fn test_response_from_discount() {
        let discount = Discount::from_totals(
            Money::from_cents(3000),
            Money::from_cents(600),
            Vec::new(),
            CalculationOutcome::RulesExhausted,
        );
        let response = DiscountResponse::from(&discount);
        assert_eq!(response.original_amount, 30.0);
        assert_eq!(response.discount_amount, 6.0);
        assert_eq!(response.final_amount, 24.0);
        assert!((response.discount_percent - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse::new("books[0].id is required")).unwrap();
        assert_eq!(json, r#"{"error":"books[0].id is required"}"#);
    }
}
