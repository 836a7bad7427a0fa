use chrono::{DateTime, FixedOffset};

use folio_config::FolioConfig;
use folio_core::{Book, CustomerType, Money};

use super::{build_engine, CommandResult, EXIT_REJECTED};

/// Parses `ID=CENTS`. The last `=` splits, so ids may contain `=`.
pub fn parse_book(raw: &str) -> Result<Book, String> {
    let (id, cents) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ID=CENTS, got '{raw}'"))?;
    let cents = cents
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("price of '{id}' must be whole cents, got '{cents}'"))?;
    Ok(Book::new(id, Money::from_cents(cents)))
}

/// Prices a cart given directly in cents and prints the full `Discount`,
/// including which rules fired.
pub fn run(
    config: &FolioConfig,
    customer: &str,
    books: &[String],
    at: Option<DateTime<FixedOffset>>,
) -> CommandResult {
    let customer_type = match customer.parse::<CustomerType>() {
        Ok(customer_type) => customer_type,
        Err(error) => return CommandResult::failure(EXIT_REJECTED, error),
    };

    let books = match books.iter().map(|raw| parse_book(raw)).collect::<Result<Vec<_>, _>>() {
        Ok(books) => books,
        Err(error) => return CommandResult::failure(EXIT_REJECTED, error),
    };

    let engine = match build_engine(config, at) {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    match engine.calculate(customer_type, &books) {
        Ok(discount) => CommandResult::json(&discount),
        Err(error) => CommandResult::from_engine_error(&error),
    }
}
