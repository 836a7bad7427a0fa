//! # Domain Types
//!
//! Core domain types used throughout Folio.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │  CustomerType   │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (title)     │   │  New            │   │  percent (u8)   │       │
//! │  │  price (Money)  │   │  Old            │   │  0..=100        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │                          Discount                             │     │
//! │  │  cart_amount, discount_amount, total_cost, discount_percent   │     │
//! │  │  applied_rules: [AppliedRule]   outcome: CalculationOutcome   │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Book Identity
//! `Book::id` names a title, not a physical copy. Six copies of the same
//! novel are six `Book` values sharing one id, and the bulk rule groups them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Customer Type
// =============================================================================

/// Whether the customer has bought from the store before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Has never completed a purchase.
    New,
    /// Has purchased before.
    Old,
}

impl CustomerType {
    /// Wire name of this customer type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CustomerType::New => "new",
            CustomerType::Old => "old",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(CustomerType::New),
            "old" => Ok(CustomerType::Old),
            _ => Err(ValidationError::NotAllowed {
                field: "customer_type".to_string(),
                value: s.to_string(),
                allowed: vec!["new".to_string(), "old".to_string()],
            }),
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A whole-number percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiscountRate(u8);

impl DiscountRate {
    /// Largest allowed rate.
    pub const MAX: u8 = 100;

    /// Creates a rate, or `None` if `percent` exceeds 100.
    #[inline]
    pub const fn new(percent: u8) -> Option<Self> {
        if percent > Self::MAX {
            None
        } else {
            Some(DiscountRate(percent))
        }
    }

    /// Returns the rate as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DiscountRate {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        DiscountRate::new(percent)
            .ok_or_else(|| format!("discount rate must be between 0 and 100, got {percent}"))
    }
}

impl From<DiscountRate> for u8 {
    fn from(rate: DiscountRate) -> u8 {
        rate.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Book
// =============================================================================

/// One line of a cart: a single copy of a title at its price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Book {
    /// Title identifier. Copies of the same title share it.
    pub id: String,

    /// Price in cents (smallest currency unit).
    pub price: Money,
}

impl Book {
    pub fn new(id: impl Into<String>, price: Money) -> Self {
        Book {
            id: id.into(),
            price,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// One rule's contribution to a `Discount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRule {
    pub rule_name: String,
    pub discount_amount: Money,
    /// How many books this rule claimed from the remaining set.
    pub books_claimed: usize,
}

/// Why the engine stopped walking the rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// The cart had no books; no rule was consulted.
    EmptyCart,
    /// Every rule was consulted.
    RulesExhausted,
    /// Earlier rules claimed every book before the list ran out.
    BooksExhausted,
    /// A rule that blocks lower-priority rules was applied.
    Blocked { rule: String },
}

/// The final result of a discount calculation.
///
/// ## Invariant
/// `total_cost + discount_amount == cart_amount`, exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Sum of every book's price, before any discount.
    pub cart_amount: Money,
    /// `discount_amount / cart_amount`, 0 for a zero-value cart.
    pub discount_percent: f64,
    /// Sum of every applied rule's contribution.
    pub discount_amount: Money,
    /// What the customer pays.
    pub total_cost: Money,
    /// Per-rule breakdown, in application order.
    #[serde(default)]
    pub applied_rules: Vec<AppliedRule>,
    pub outcome: CalculationOutcome,
}

impl Discount {
    /// The discount for an empty cart: every field zero.
    pub fn zero() -> Self {
        Discount {
            cart_amount: Money::zero(),
            discount_percent: 0.0,
            discount_amount: Money::zero(),
            total_cost: Money::zero(),
            applied_rules: Vec::new(),
            outcome: CalculationOutcome::EmptyCart,
        }
    }

    /// Derives `total_cost` and `discount_percent` from the two totals.
    pub fn from_totals(
        cart_amount: Money,
        discount_amount: Money,
        applied_rules: Vec<AppliedRule>,
        outcome: CalculationOutcome,
    ) -> Self {
        Discount {
            cart_amount,
            discount_percent: discount_amount.ratio_of(cart_amount),
            discount_amount,
            total_cost: cart_amount - discount_amount,
            applied_rules,
            outcome,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
