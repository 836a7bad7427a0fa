//! # Validation Module
//!
//! Input validation for carts reaching the rule engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Wire (dto module)                                            │
//! │  ├── customer_type is "new" or "old"                                   │
//! │  └── prices are finite decimals                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: RuleEngine::calculate                                        │
//! │  └── THIS MODULE: every book has an id and a non-negative price        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: DiscountRule::apply                                          │
//! │  └── THIS MODULE again: each rule re-checks the books it is handed     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::validate_books;
//! use folio_core::{Book, Money};
//!
//! let books = vec![Book::new("1", Money::from_cents(0))];
//! assert!(validate_books(&books).is_ok()); // free books are fine
//!
//! let books = vec![Book::new("", Money::from_cents(1000))];
//! assert!(validate_books(&books).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Book;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a book id.
///
/// ## Rules
/// - Must not be empty or whitespace-only
pub fn validate_book_id(id: &str, field: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free books)
pub fn validate_price(price: Money, field: &str) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a single book at position `index` of a cart.
pub fn validate_book(book: &Book, index: usize) -> ValidationResult<()> {
    validate_book_id(&book.id, &format!("books[{index}].id"))?;
    validate_price(book.price, &format!("books[{index}].price"))?;
    Ok(())
}

/// Validates every book in a cart, stopping at the first failure.
pub fn validate_books(books: &[Book]) -> ValidationResult<()> {
    books
        .iter()
        .enumerate()
        .try_for_each(|(index, book)| validate_book(book, index))
}

/// Validates a decimal amount arriving over the wire.
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must fit in i64 cents after scaling
pub fn validate_major_amount(amount: f64, field: &str) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    // i64::MAX as f64 rounds up to 2^63, so this rejects exactly the
    // values whose cents would not fit
    if (amount * 100.0).abs() >= i64::MAX as f64 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "amount is too large".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
