//! # folio-core: Pure Discount Logic for Folio
//!
//! This crate is the **heart** of Folio. It decides how much a bookstore
//! cart is discounted, given who the customer is and which books they carry.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            folio-cli / any transport the caller owns             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DiscountRequest                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   DiscountService ──► RuleEngine ──► [DiscountRule, ...]        │   │
//! │  │          ▲                 ▲                                    │   │
//! │  │          │                 │ built once from                    │   │
//! │  │          │        DiscountConfig + RuleRegistry + Clock         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              folio-config (files, environment)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Book, CustomerType, Discount, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Book and price validation
//! - [`clock`] - Injectable time source
//! - [`rules`] - The discount rules and their registry
//! - [`config`] - Ordered, validated rule configuration
//! - [`engine`] - Applies the configured rules to a cart
//! - [`service`] - Facade owning one engine
//! - [`dto`] - Wire-shaped request/response types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{FixedOffset, TimeZone};
//! use folio_core::{Book, CustomerType, DiscountConfig, FixedClock, Money, RuleEngine};
//!
//! // A Monday, so the Friday rule stays quiet
//! let monday = FixedOffset::east_opt(0)
//!     .unwrap()
//!     .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
//!     .unwrap();
//! let engine = RuleEngine::build(&DiscountConfig::default(), Arc::new(FixedClock::new(monday)))
//!     .unwrap();
//!
//! let books = vec![
//!     Book::new("1", Money::from_cents(1000)),
//!     Book::new("2", Money::from_cents(1000)),
//!     Book::new("3", Money::from_cents(1000)),
//! ];
//! let discount = engine.calculate(CustomerType::New, &books).unwrap();
//!
//! // New customer with 3 books: 20% volume discount
//! assert_eq!(discount.discount_amount.cents(), 600);
//! assert_eq!(discount.total_cost.cents(), 2400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod money;
pub mod rules;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Money` instead of
// `use folio_core::money::Money`

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DiscountConfig, RuleConfig};
pub use engine::RuleEngine;
pub use error::{
    ConfigError, EngineError, ParamError, RegistryError, RuleError, ServiceError,
    ValidationError,
};
pub use money::Money;
pub use rules::{DiscountRule, RuleContext, RuleParams, RuleRegistry, RuleResult};
pub use service::{DiscountCalculator, DiscountService};
pub use types::*;
