//! Tiered discount by customer type and number of books.
//!
//! ## Default Tiers
//! ```text
//! ┌──────────┬────────────┬──────────┐
//! │ Customer │ Books      │ Discount │
//! ├──────────┼────────────┼──────────┤
//! │ new      │ 2 ..= 5    │ 20%      │
//! │ old      │ 2 ..= 5    │ 10%      │
//! │ old      │ 6 ..= 10   │  5%      │
//! │ old      │ 11 ..      │  2%      │
//! └──────────┴────────────┴──────────┘
//! ```
//!
//! Ranges are checked in configured order and the first match wins; the
//! rule never reorders them.

use serde_json::Value;

use crate::error::{ParamError, ParamResult, RuleError};
use crate::rules::params::{count, rate, required, RuleParams};
use crate::rules::{percent_of_each, DiscountRule, RuleContext, RuleResult};
use crate::types::{CustomerType, DiscountRate};
use crate::validation::validate_books;

/// One tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRange {
    pub customer_type: CustomerType,
    pub min_books: usize,
    /// `None` means no upper bound.
    pub max_books: Option<usize>,
    pub discount_rate: DiscountRate,
}

impl VolumeRange {
    pub fn matches(&self, customer_type: CustomerType, book_count: usize) -> bool {
        self.customer_type == customer_type
            && self.min_books <= book_count
            && self.max_books.map_or(true, |max| book_count <= max)
    }

    fn from_value(index: usize, value: &Value) -> ParamResult<Self> {
        let object = value.as_object().ok_or_else(|| ParamError::WrongType {
            param: format!("ranges[{index}]"),
            expected: "an object",
        })?;
        let field = |name: &str| format!("ranges[{index}].{name}");

        let customer_param = field("customerType");
        let customer_raw = required(object.get("customerType"), &customer_param)?
            .as_str()
            .ok_or_else(|| ParamError::WrongType {
                param: customer_param.clone(),
                expected: "a string",
            })?;
        let customer_type = customer_raw
            .parse::<CustomerType>()
            .map_err(|_| ParamError::UnknownCustomerType {
                index,
                value: customer_raw.to_string(),
            })?;

        let min_param = field("minBooks");
        let min_books = count(required(object.get("minBooks"), &min_param)?, &min_param)?;

        let max_param = field("maxBooks");
        let max_books = match object.get("maxBooks") {
            None | Some(Value::Null) => None,
            Some(value) => Some(count(value, &max_param)?),
        };
        if let Some(max_books) = max_books {
            if max_books < min_books {
                return Err(ParamError::InvertedRange {
                    index,
                    min_books,
                    max_books,
                });
            }
        }

        let rate_param = field("discountRate");
        let discount_rate = rate(required(object.get("discountRate"), &rate_param)?, &rate_param)?;

        Ok(VolumeRange {
            customer_type,
            min_books,
            max_books,
            discount_rate,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDiscountRule {
    ranges: Vec<VolumeRange>,
}

impl VolumeDiscountRule {
    pub const NAME: &'static str = "VolumeDiscountRule";

    pub fn new(ranges: Vec<VolumeRange>) -> Self {
        VolumeDiscountRule { ranges }
    }

    /// Reads `ranges`, a non-empty list of tier objects.
    pub fn from_params(params: &RuleParams) -> ParamResult<Self> {
        let list = required(params.get("ranges"), "ranges")?
            .as_array()
            .ok_or_else(|| ParamError::WrongType {
                param: "ranges".to_string(),
                expected: "a list",
            })?;
        if list.is_empty() {
            return Err(ParamError::EmptyRanges);
        }

        let ranges = list
            .iter()
            .enumerate()
            .map(|(index, value)| VolumeRange::from_value(index, value))
            .collect::<ParamResult<Vec<_>>>()?;
        Ok(VolumeDiscountRule { ranges })
    }

    pub fn ranges(&self) -> &[VolumeRange] {
        &self.ranges
    }

    /// First range, in configured order, that covers this cart.
    pub fn matching_range(
        &self,
        customer_type: CustomerType,
        book_count: usize,
    ) -> Option<&VolumeRange> {
        self.ranges
            .iter()
            .find(|range| range.matches(customer_type, book_count))
    }
}

impl DiscountRule for VolumeDiscountRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_apply(&self, ctx: &RuleContext<'_>) -> bool {
        self.matching_range(ctx.customer_type, ctx.books.len())
            .is_some()
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Result<RuleResult, RuleError> {
        validate_books(ctx.books)?;

        let book_count = ctx.books.len();
        let range = self
            .matching_range(ctx.customer_type, book_count)
            .ok_or(RuleError::NoMatchingRange {
                customer_type: ctx.customer_type,
                book_count,
            })?;

        let discount_amount = percent_of_each(ctx.books, range.discount_rate);
        Ok(RuleResult::claim_all(Self::NAME, ctx.books, discount_amount))
    }

    fn blocks_other_rules(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::params_from_json;
    use crate::rules::test_support::*;
    use crate::types::Book;
    use serde_json::json;

    fn range(customer_type: CustomerType, min: usize, max: Option<usize>, pct: u8) -> VolumeRange {
        VolumeRange {
            customer_type,
            min_books: min,
            max_books: max,
            discount_rate: DiscountRate::new(pct).unwrap(),
        }
    }

    fn default_tiers() -> VolumeDiscountRule {
        VolumeDiscountRule::new(vec![
            range(CustomerType::New, 2, Some(5), 20),
            range(CustomerType::Old, 2, Some(5), 10),
            range(CustomerType::Old, 6, Some(10), 5),
            range(CustomerType::Old, 11, None, 2),
        ])
    }

    fn distinct(count: usize, cents: i64) -> Vec<Book> {
        (0..count).map(|i| book(&format!("b{i}"), cents)).collect()
    }

    #[test]
    fn test_new_customer_three_books() {
        let books = distinct(3, 1000);
        let ctx = RuleContext::new(CustomerType::New, &books, monday());
        let rule = default_tiers();

        assert!(rule.can_apply(&ctx));
        let result = rule.apply(&ctx).unwrap();
        assert_eq!(result.discount_amount.cents(), 600);
        assert_eq!(result.applied_books.len(), 3);
        assert!(result.remaining_books.is_empty());
    }

    #[test]
    fn test_tier_boundaries() {
        let rule = default_tiers();
        let rate_for = |customer, n| {
            rule.matching_range(customer, n)
                .map(|r| r.discount_rate.percent())
        };

        assert_eq!(rate_for(CustomerType::New, 1), None);
        assert_eq!(rate_for(CustomerType::New, 2), Some(20));
        assert_eq!(rate_for(CustomerType::New, 5), Some(20));
        assert_eq!(rate_for(CustomerType::New, 6), None);

        assert_eq!(rate_for(CustomerType::Old, 1), None);
        assert_eq!(rate_for(CustomerType::Old, 5), Some(10));
        assert_eq!(rate_for(CustomerType::Old, 6), Some(5));
        assert_eq!(rate_for(CustomerType::Old, 10), Some(5));
        assert_eq!(rate_for(CustomerType::Old, 11), Some(2));
        assert_eq!(rate_for(CustomerType::Old, 500), Some(2));
    }

    #[test]
    fn test_old_customer_fifteen_books_truncates_per_book() {
        let books = distinct(15, 1999);
        let ctx = RuleContext::new(CustomerType::Old, &books, monday());
        let result = default_tiers().apply(&ctx).unwrap();
        // 1999 × 2 / 100 = 39.98 → 39, fifteen times
        assert_eq!(result.discount_amount.cents(), 15 * 39);
    }

    #[test]
    fn test_first_matching_range_wins() {
        let rule = VolumeDiscountRule::new(vec![
            range(CustomerType::Old, 2, Some(10), 7),
            range(CustomerType::Old, 5, None, 30),
        ]);
        let books = distinct(6, 1000);
        let ctx = RuleContext::new(CustomerType::Old, &books, monday());
        assert_eq!(rule.apply(&ctx).unwrap().discount_amount.cents(), 420);
    }

    #[test]
    fn test_zero_rate_range_is_still_a_match() {
        let rule = VolumeDiscountRule::new(vec![range(CustomerType::New, 1, None, 0)]);
        let books = distinct(2, 1000);
        let ctx = RuleContext::new(CustomerType::New, &books, monday());
        assert!(rule.can_apply(&ctx));
        let result = rule.apply(&ctx).unwrap();
        assert!(result.discount_amount.is_zero());
        assert_eq!(result.applied_books.len(), 2);
    }

    #[test]
    fn test_apply_without_match_is_an_error() {
        let books = distinct(1, 1000);
        let ctx = RuleContext::new(CustomerType::Old, &books, monday());
        let err = default_tiers().apply(&ctx).unwrap_err();
        assert_eq!(
            err,
            RuleError::NoMatchingRange {
                customer_type: CustomerType::Old,
                book_count: 1
            }
        );
    }

    #[test]
    fn test_from_params_reads_tiers_in_order() {
        let params = params_from_json(json!({
            "ranges": [
                { "customerType": "new", "minBooks": 2, "maxBooks": 5, "discountRate": 20 },
                { "customerType": "old", "minBooks": 11, "maxBooks": null, "discountRate": 2 },
                { "customerType": "old", "minBooks": 6, "discountRate": 5 }
            ]
        }));
        let rule = VolumeDiscountRule::from_params(&params).unwrap();
        assert_eq!(
            rule.ranges(),
            &[
                range(CustomerType::New, 2, Some(5), 20),
                range(CustomerType::Old, 11, None, 2),
                range(CustomerType::Old, 6, None, 5),
            ]
        );
    }

    #[test]
    fn test_from_params_rejects_bad_tiers() {
        let parse = |value: serde_json::Value| {
            VolumeDiscountRule::from_params(&params_from_json(json!({ "ranges": value })))
        };

        assert_eq!(parse(json!([])).unwrap_err(), ParamError::EmptyRanges);
        assert!(matches!(
            parse(json!("tiers")).unwrap_err(),
            ParamError::WrongType { .. }
        ));
        assert_eq!(
            parse(json!([{ "customerType": "vip", "minBooks": 1, "discountRate": 5 }]))
                .unwrap_err(),
            ParamError::UnknownCustomerType {
                index: 0,
                value: "vip".to_string()
            }
        );
        assert_eq!(
            parse(json!([
                { "customerType": "new", "minBooks": 1, "discountRate": 5 },
                { "customerType": "old", "minBooks": 6, "maxBooks": 3, "discountRate": 5 }
            ]))
            .unwrap_err(),
            ParamError::InvertedRange {
                index: 1,
                min_books: 6,
                max_books: 3
            }
        );
        assert_eq!(
            parse(json!([{ "customerType": "old", "minBooks": 1, "discountRate": 101 }]))
                .unwrap_err()
                .to_string(),
            "ranges[0].discountRate must be between 0 and 100, got 101"
        );
        assert!(VolumeDiscountRule::from_params(&RuleParams::new()).is_err());
    }
}
