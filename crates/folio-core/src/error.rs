//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Construction time (fatal, surfaced by RuleEngine::build)              │
//! │  ├── ConfigError      - empty list, duplicates, bad params             │
//! │  ├── RegistryError    - unknown rule, factory rejected params          │
//! │  └── ParamError       - one parameter failed its schema                │
//! │                                                                         │
//! │  Per call (recoverable, surfaced by calculate)                         │
//! │  ├── ValidationError  - bad book id/price, unknown customer type       │
//! │  └── RuleError        - a rule failed while applying                   │
//! │                                                                         │
//! │  EngineError wraps all of the above with the failing rule's name.      │
//! │  ServiceError adds the wire-level validation of DiscountRequest.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (rule name, field, index)
//! 3. Errors are enum variants, never String
//! 4. No error is swallowed: a failing rule aborts the whole calculation

use thiserror::Error;

use crate::types::CustomerType;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a cart or request doesn't meet requirements. They are
/// the caller's fault and map to a client-facing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a non-finite price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of {allowed:?}, got '{value}'")]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

// =============================================================================
// Parameter Error
// =============================================================================

/// A rule parameter failed its schema.
///
/// `param` is the path of the offending value, e.g. `discountRate` or
/// `ranges[2].maxBooks`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{param} is required")]
    Missing { param: String },

    #[error("{param} must be {expected}")]
    WrongType {
        param: String,
        expected: &'static str,
    },

    #[error("{param} must be >= 0, got {value}")]
    Negative { param: String, value: i64 },

    #[error("{param} must be between {min} and {max}, got {value}")]
    OutOfRange {
        param: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("ranges cannot be empty")]
    EmptyRanges,

    #[error("ranges[{index}].customerType must be 'new' or 'old', got '{value}'")]
    UnknownCustomerType { index: usize, value: String },

    #[error("ranges[{index}].maxBooks ({max_books}) must be >= minBooks ({min_books})")]
    InvertedRange {
        index: usize,
        min_books: usize,
        max_books: usize,
    },
}

// =============================================================================
// Configuration Error
// =============================================================================

/// The rule configuration as a whole is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config must have at least one rule")]
    NoRules,

    #[error("rule {index}: name cannot be empty")]
    EmptyName { index: usize },

    #[error("duplicate rule name: {0}")]
    DuplicateName(String),

    #[error("duplicate priority {priority}: rules {first} and {second}")]
    DuplicatePriority {
        priority: i64,
        first: String,
        second: String,
    },

    #[error("rule {rule}: {source}")]
    InvalidParams { rule: String, source: ParamError },
}

// =============================================================================
// Registry Error
// =============================================================================

/// A rule could not be constructed by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No factory is registered under this name.
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    /// The factory rejected the parameters.
    #[error("invalid parameter: {source}")]
    InvalidParameter { rule: String, source: ParamError },
}

// =============================================================================
// Rule Error
// =============================================================================

/// A rule failed while applying to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `apply` was reached with no range matching. Means `can_apply` and
    /// `apply` disagree, which is a bug, but it is still reported as a value.
    #[error("no matching discount range for customer type {customer_type} and {book_count} books")]
    NoMatchingRange {
        customer_type: CustomerType,
        book_count: usize,
    },
}

// =============================================================================
// Engine Error
// =============================================================================

/// Everything `RuleEngine::build` and `RuleEngine::calculate` can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create rule {rule}: {source}")]
    RuleConstruction { rule: String, source: RegistryError },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("rule {rule} failed: {source}")]
    RuleFailed { rule: String, source: RuleError },
}

impl EngineError {
    /// Returns true if the caller's input was at fault (maps to a 4xx).
    pub fn is_client_error(&self) -> bool {
        match self {
            EngineError::Validation(_) => true,
            EngineError::RuleFailed { source, .. } => {
                matches!(source, RuleError::Validation(_))
            }
            _ => false,
        }
    }

    /// Returns true if this error came from building the engine.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EngineError::Config(_) | EngineError::RuleConstruction { .. }
        )
    }
}

// =============================================================================
// Service Error
// =============================================================================

/// Errors from the request-shaped entry point of `DiscountService`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ServiceError {
    /// Returns true if the request itself was at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::Validation(_) => true,
            ServiceError::Engine(err) => err.is_client_error(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type EngineResult<T> = Result<T, EngineError>;
pub type ParamResult<T> = Result<T, ParamError>;

// =============================================================================
// Unit Tests
// =============================================================================
