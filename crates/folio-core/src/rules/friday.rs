//! Everything left in the cart is discounted on Fridays.
//!
//! Once applied, no lower-priority rule runs. It should therefore sit after
//! the rules it is meant to coexist with (the default config puts the bulk
//! rule before it and the volume tiers after it).

use chrono::{Datelike, Weekday};

use crate::error::{ParamResult, RuleError};
use crate::rules::params::{required_rate, RuleParams};
use crate::rules::{percent_of_each, DiscountRule, RuleContext, RuleResult};
use crate::types::DiscountRate;
use crate::validation::validate_books;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FridayRule {
    discount_rate: DiscountRate,
}

impl FridayRule {
    pub const NAME: &'static str = "FridayRule";

    pub const DEFAULT_DISCOUNT_RATE: u8 = 5;

    pub fn new(discount_rate: DiscountRate) -> Self {
        FridayRule { discount_rate }
    }

    /// Reads `discountRate`.
    pub fn from_params(params: &RuleParams) -> ParamResult<Self> {
        Ok(FridayRule {
            discount_rate: required_rate(params, "discountRate")?,
        })
    }
}

impl DiscountRule for FridayRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_apply(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.now.weekday() == Weekday::Fri
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Result<RuleResult, RuleError> {
        validate_books(ctx.books)?;

        let discount_amount = percent_of_each(ctx.books, self.discount_rate);
        Ok(RuleResult::claim_all(Self::NAME, ctx.books, discount_amount))
    }

    fn blocks_other_rules(&self) -> bool {
        true
    }
}
