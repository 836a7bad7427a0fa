use chrono::{DateTime, FixedOffset};
use tracing::info;

use folio_config::FolioConfig;
use folio_core::dto::DiscountRequest;
use folio_core::DiscountService;

use super::{build_engine, CommandResult, EXIT_REJECTED};

/// Prices one `DiscountRequest` given as JSON text.
pub fn run(config: &FolioConfig, body: &str, at: Option<DateTime<FixedOffset>>) -> CommandResult {
    let request: DiscountRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(EXIT_REJECTED, format!("invalid request body: {error}"))
        }
    };

    let service = match build_engine(config, at) {
        Ok(engine) => DiscountService::from_engine(engine),
        Err(result) => return result,
    };

    match service.calculate_request(&request) {
        Ok(response) => {
            info!(
                original = response.original_amount,
                discount = response.discount_amount,
                "Discount calculated"
            );
            CommandResult::json(&response)
        }
        Err(error) => CommandResult::from_service_error(&error),
    }
}
