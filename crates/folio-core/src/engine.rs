//! # Rule Engine
//!
//! Applies the configured rules to a cart, in priority order.
//!
//! ## Calculation Flow
//! ```text
//! books ──► validate ──► cart_amount = Σ price
//!                              │
//!            remaining = books │  now = clock.now()  (read once)
//!                              ▼
//!   ┌──────────────── for rule in rules (priority order) ──────────────┐
//!   │  remaining empty?        ──yes──► stop (BooksExhausted)          │
//!   │  rule.can_apply?         ──no───► next rule                      │
//!   │  rule.apply              ──err──► abort the whole calculation    │
//!   │  discount += amount; remaining = result.remaining_books          │
//!   │  rule blocks others?     ──yes──► stop (Blocked)                 │
//!   └──────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!          total_cost = cart_amount - discount_amount
//! ```
//!
//! A book claimed by one rule is never seen by a later rule, so discounts
//! stack across disjoint parts of the cart but never on the same copy.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::DiscountConfig;
use crate::error::{EngineError, EngineResult, ValidationError};
use crate::money::Money;
use crate::rules::{DiscountRule, RuleContext, RuleRegistry};
use crate::types::{AppliedRule, Book, CalculationOutcome, CustomerType, Discount};
use crate::validation::{validate_books, ValidationResult};

/// An ordered, immutable set of live rules plus the clock they read.
///
/// Built once, then shared. `calculate` takes `&self` and touches no
/// mutable state.
#[derive(Debug)]
pub struct RuleEngine {
    rules: Vec<Box<dyn DiscountRule>>,
    clock: Arc<dyn Clock>,
}

impl RuleEngine {
    /// Builds an engine with the built-in rules.
    pub fn build(config: &DiscountConfig, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        Self::build_with_registry(config, &RuleRegistry::with_builtin_rules(), clock)
    }

    /// Builds an engine, resolving rule names through `registry`.
    ///
    /// The config is validated, sorted by priority, and every enabled entry
    /// is instantiated. Disabled entries are skipped.
    pub fn build_with_registry(
        config: &DiscountConfig,
        registry: &RuleRegistry,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        config.validate()?;

        let mut ordered = config.clone();
        ordered.sort();

        let rules = ordered
            .enabled_rules()
            .map(|entry| {
                registry
                    .create(&entry.name, &entry.params)
                    .map_err(|source| EngineError::RuleConstruction {
                        rule: entry.name.clone(),
                        source,
                    })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let engine = RuleEngine { rules, clock };
        info!(rules = ?engine.rule_names(), "Discount engine ready");
        Ok(engine)
    }

    /// Instantiated rule names in application order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Computes the discount for one cart.
    ///
    /// An empty cart is not an error; it gets an all-zero discount. Any
    /// rule failure aborts the call and no partial discount is returned.
    pub fn calculate(&self, customer_type: CustomerType, books: &[Book]) -> EngineResult<Discount> {
        if books.is_empty() {
            return Ok(Discount::zero());
        }

        validate_books(books)?;

        let cart_amount = cart_total(books)?;
        let now = self.clock.now();

        let mut remaining: Vec<Book> = books.to_vec();
        let mut discount_amount = Money::zero();
        let mut applied_rules = Vec::new();
        let mut outcome = CalculationOutcome::RulesExhausted;

        for rule in &self.rules {
            if remaining.is_empty() {
                outcome = CalculationOutcome::BooksExhausted;
                break;
            }

            let ctx = RuleContext::new(customer_type, &remaining, now);
            if !rule.can_apply(&ctx) {
                debug!(rule = rule.name(), remaining = remaining.len(), "Rule skipped");
                continue;
            }

            let result = rule.apply(&ctx).map_err(|source| {
                warn!(rule = rule.name(), error = %source, "Rule failed");
                EngineError::RuleFailed {
                    rule: rule.name().to_string(),
                    source,
                }
            })?;

            debug!(
                rule = rule.name(),
                amount = result.discount_amount.cents(),
                claimed = result.applied_books.len(),
                "Rule applied"
            );

            discount_amount += result.discount_amount;
            applied_rules.push(AppliedRule {
                rule_name: result.rule_name,
                discount_amount: result.discount_amount,
                books_claimed: result.applied_books.len(),
            });
            remaining = result.remaining_books;

            if rule.blocks_other_rules() {
                outcome = CalculationOutcome::Blocked {
                    rule: rule.name().to_string(),
                };
                break;
            }
        }

        Ok(Discount::from_totals(
            cart_amount,
            discount_amount,
            applied_rules,
            outcome,
        ))
    }
}

/// Sum of all prices. Each price fits in i64 cents on its own; the total
/// may not.
fn cart_total(books: &[Book]) -> ValidationResult<Money> {
    books
        .iter()
        .try_fold(Money::zero(), |total, book| total.checked_add(book.price))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "books".to_string(),
            min: 0,
            max: i64::MAX,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
