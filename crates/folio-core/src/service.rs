//! # Discount Service
//!
//! The entry point callers hold on to. Owns one `RuleEngine`, built at
//! startup, and exposes it both in domain terms (`CustomerType`, `Book`)
//! and in wire terms (`DiscountRequest`, `DiscountResponse`).

use std::sync::Arc;
use tracing::debug;

use crate::clock::Clock;
use crate::config::DiscountConfig;
use crate::dto::{DiscountRequest, DiscountResponse};
use crate::engine::RuleEngine;
use crate::error::{EngineResult, ServiceError};
use crate::types::{Book, CustomerType, Discount};

/// Anything that can price a cart.
///
/// Callers depend on this rather than on `DiscountService` so a fake can
/// stand in during their own tests.
pub trait DiscountCalculator: Send + Sync {
    fn calculate(&self, customer_type: CustomerType, books: &[Book]) -> EngineResult<Discount>;
}

impl DiscountCalculator for RuleEngine {
    fn calculate(&self, customer_type: CustomerType, books: &[Book]) -> EngineResult<Discount> {
        RuleEngine::calculate(self, customer_type, books)
    }
}

#[derive(Debug)]
pub struct DiscountService {
    engine: RuleEngine,
}

impl DiscountService {
    pub fn new(config: &DiscountConfig, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        Ok(DiscountService {
            engine: RuleEngine::build(config, clock)?,
        })
    }

    /// A service running `DiscountConfig::default()`.
    pub fn with_defaults(clock: Arc<dyn Clock>) -> EngineResult<Self> {
        Self::new(&DiscountConfig::default(), clock)
    }

    pub fn from_engine(engine: RuleEngine) -> Self {
        DiscountService { engine }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Prices a wire request.
    pub fn calculate_request(
        &self,
        request: &DiscountRequest,
    ) -> Result<DiscountResponse, ServiceError> {
        let customer_type = request.customer_type()?;
        let books = request.books()?;

        debug!(
            customer_id = request.customer_id.as_deref().unwrap_or("-"),
            cash_register_id = request.cash_register_id.as_deref().unwrap_or("-"),
            %customer_type,
            books = books.len(),
            "Calculating discount"
        );

        let discount = self.engine.calculate(customer_type, &books)?;
        Ok(DiscountResponse::from(&discount))
    }
}

impl DiscountCalculator for DiscountService {
    fn calculate(&self, customer_type: CustomerType, books: &[Book]) -> EngineResult<Discount> {
        self.engine.calculate(customer_type, books)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
