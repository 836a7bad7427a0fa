//! # Discount Rules
//!
//! A rule is one discount policy. The engine hands each rule the books no
//! earlier rule has claimed; the rule decides whether it applies, and if so
//! which books it claims and how much it takes off.
//!
//! ## Rule Lifecycle Within One Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   remaining books ──► RuleContext ──► can_apply? ──no──► next rule      │
//! │                                           │                             │
//! │                                          yes                            │
//! │                                           ▼                             │
//! │                                        apply()                          │
//! │                                           │                             │
//! │              ┌────────────────────────────┼──────────────────────┐      │
//! │              ▼                            ▼                      ▼      │
//! │        applied_books               discount_amount        remaining_books│
//! │     (claimed, gone for          (added to the total)    (handed to the  │
//! │      lower priorities)                                    next rule)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Built-in Rules
//! | Name                 | Claims                   | Blocks others |
//! |----------------------|--------------------------|---------------|
//! | `BulkSameBookRule`   | qualifying title groups  | no            |
//! | `FridayRule`         | everything, on Fridays   | yes           |
//! | `VolumeDiscountRule` | everything, by tier      | no            |

mod bulk_same_book;
mod friday;
pub mod params;
mod registry;
mod volume_discount;

pub use bulk_same_book::BulkSameBookRule;
pub use friday::FridayRule;
pub use params::{params_from_json, RuleParams};
pub use registry::{RuleFactory, RuleRegistry};
pub use volume_discount::{VolumeDiscountRule, VolumeRange};

use chrono::{DateTime, FixedOffset};
use std::fmt;

use crate::error::RuleError;
use crate::money::Money;
use crate::types::{Book, CustomerType, DiscountRate};

// =============================================================================
// Rule Context
// =============================================================================

/// What a rule gets to look at: a read-only snapshot of one step.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub customer_type: CustomerType,
    /// Books not yet claimed by an earlier rule.
    pub books: &'a [Book],
    pub now: DateTime<FixedOffset>,
}

impl<'a> RuleContext<'a> {
    pub fn new(customer_type: CustomerType, books: &'a [Book], now: DateTime<FixedOffset>) -> Self {
        RuleContext {
            customer_type,
            books,
            now,
        }
    }
}

// =============================================================================
// Rule Result
// =============================================================================

/// What a rule did.
///
/// ## Invariant
/// `applied_books` and `remaining_books` partition the input books: every
/// input book is in exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub applied_books: Vec<Book>,
    pub remaining_books: Vec<Book>,
    pub discount_amount: Money,
    pub rule_name: String,
}

impl RuleResult {
    /// A result that claims every book it was given.
    pub fn claim_all(rule_name: &str, books: &[Book], discount_amount: Money) -> Self {
        RuleResult {
            applied_books: books.to_vec(),
            remaining_books: Vec::new(),
            discount_amount,
            rule_name: rule_name.to_string(),
        }
    }
}

// =============================================================================
// Rule Trait
// =============================================================================

/// One discount policy.
///
/// Rules are built once from configuration and then shared by every
/// calculation, so they hold only their validated parameters.
pub trait DiscountRule: Send + Sync + fmt::Debug {
    /// Stable identifier; matches the rule's configuration name.
    fn name(&self) -> &str;

    /// Whether `apply` would do anything for this context. Pure.
    fn can_apply(&self, ctx: &RuleContext<'_>) -> bool;

    /// Computes the discount and splits the books into claimed/remaining.
    ///
    /// The engine only calls this after `can_apply` returned true, but the
    /// books are validated here again regardless.
    fn apply(&self, ctx: &RuleContext<'_>) -> Result<RuleResult, RuleError>;

    /// Whether a successful application ends the calculation.
    fn blocks_other_rules(&self) -> bool;
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// `rate` percent of each book's price, truncated per book, then summed.
pub(crate) fn percent_of_each<'a>(
    books: impl IntoIterator<Item = &'a Book>,
    rate: DiscountRate,
) -> Money {
    books.into_iter().map(|book| book.price.percent(rate)).sum()
}
