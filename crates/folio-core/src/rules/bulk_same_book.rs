//! Every second copy of a title bought in bulk is discounted.
//!
//! ## Example (minBooks = 5, discountRate = 40)
//! ```text
//! Cart: A A A A A A  B B  C
//!
//! Group A: 6 copies > 5  → qualifies
//!   index   0    1    2    3    4    5
//!   off     -   40%   -   40%   -   40%
//!   all six copies are claimed
//!
//! Group B: 2 copies      → passed on to the next rule
//! Group C: 1 copy        → passed on to the next rule
//! ```

use std::collections::BTreeMap;

use crate::error::{ParamResult, RuleError};
use crate::money::Money;
use crate::rules::params::{required_count, required_rate, RuleParams};
use crate::rules::{DiscountRule, RuleContext, RuleResult};
use crate::types::{Book, DiscountRate};
use crate::validation::validate_books;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSameBookRule {
    min_books: usize,
    discount_rate: DiscountRate,
}

impl BulkSameBookRule {
    pub const NAME: &'static str = "BulkSameBookRule";

    pub const DEFAULT_MIN_BOOKS: usize = 5;
    pub const DEFAULT_DISCOUNT_RATE: u8 = 40;

    pub fn new(min_books: usize, discount_rate: DiscountRate) -> Self {
        BulkSameBookRule {
            min_books,
            discount_rate,
        }
    }

    /// Reads `minBooks` and `discountRate`.
    pub fn from_params(params: &RuleParams) -> ParamResult<Self> {
        Ok(BulkSameBookRule {
            min_books: required_count(params, "minBooks")?,
            discount_rate: required_rate(params, "discountRate")?,
        })
    }

    fn qualifies(&self, group: &[&Book]) -> bool {
        group.len() > self.min_books
    }
}

/// Groups books by id. `BTreeMap` keeps ids in ascending order, so the
/// output never depends on hash seeds or on where copies sit in the cart.
fn group_by_id(books: &[Book]) -> BTreeMap<&str, Vec<&Book>> {
    let mut groups: BTreeMap<&str, Vec<&Book>> = BTreeMap::new();
    for book in books {
        groups.entry(book.id.as_str()).or_default().push(book);
    }
    groups
}

impl DiscountRule for BulkSameBookRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_apply(&self, ctx: &RuleContext<'_>) -> bool {
        group_by_id(ctx.books)
            .values()
            .any(|group| self.qualifies(group))
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Result<RuleResult, RuleError> {
        validate_books(ctx.books)?;

        let mut applied_books = Vec::with_capacity(ctx.books.len());
        let mut remaining_books = Vec::with_capacity(ctx.books.len());
        let mut discount_amount = Money::zero();

        for group in group_by_id(ctx.books).into_values() {
            if self.qualifies(&group) {
                discount_amount += group
                    .iter()
                    .skip(1)
                    .step_by(2)
                    .map(|book| book.price.percent(self.discount_rate))
                    .sum::<Money>();
                applied_books.extend(group.into_iter().cloned());
            } else {
                remaining_books.extend(group.into_iter().cloned());
            }
        }

        Ok(RuleResult {
            applied_books,
            remaining_books,
            discount_amount,
            rule_name: Self::NAME.to_string(),
        })
    }

    fn blocks_other_rules(&self) -> bool {
        false
    }
}
