//! # folio: Discount Calculations From the Command Line
//!
//! ```text
//! folio calculate [--request FILE|-] [--at RFC3339]    DiscountRequest JSON → DiscountResponse JSON
//! folio quote --customer old --book 1=1000 ...         quick check in cents, full breakdown
//! folio rules                                          effective rule list as TOML
//! folio check-config                                   validate and build the engine
//! ```
//!
//! Every command accepts `--config PATH`. Results go to stdout; logs go to
//! stderr.

pub mod commands;
pub mod logging;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use folio_config::FolioConfig;

use crate::commands::{CommandResult, EXIT_CONFIG};

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Bookstore discount engine",
    long_about = "Price bookstore carts against the configured discount rules.",
    after_help = "Examples:\n  echo '{\"customer_type\":\"new\",\"books\":[{\"id\":\"1\",\"price\":10.0},{\"id\":\"2\",\"price\":10.0}]}' | folio calculate\n  folio quote --customer old --book 1=1000 --book 2=1500\n  folio rules --config folio.toml"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file (TOML, or JSON by extension)"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Read a DiscountRequest as JSON and print the DiscountResponse")]
    Calculate {
        #[arg(
            long,
            default_value = "-",
            value_name = "FILE",
            help = "Request file, or - for stdin"
        )]
        request: String,
        #[arg(long, value_parser = parse_at, help = "Price as of this RFC 3339 moment")]
        at: Option<DateTime<FixedOffset>>,
    },
    #[command(about = "Price a cart given in cents and print the per-rule breakdown")]
    Quote {
        #[arg(long, help = "new or old")]
        customer: String,
        #[arg(long = "book", value_name = "ID=CENTS", help = "One copy of a book; repeat per copy")]
        books: Vec<String>,
        #[arg(long, value_parser = parse_at, help = "Price as of this RFC 3339 moment")]
        at: Option<DateTime<FixedOffset>>,
    },
    #[command(about = "Print the effective rule configuration as TOML")]
    Rules,
    #[command(about = "Validate the configuration and list the rules in application order")]
    CheckConfig,
}

fn parse_at(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let loaded = FolioConfig::load(cli.config.clone());
    let logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::init_tracing(&logging);

    let result = match loaded {
        Ok(config) => dispatch(&config, cli.command),
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            CommandResult::failure(EXIT_CONFIG, &err)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn dispatch(config: &FolioConfig, command: Command) -> CommandResult {
    match command {
        Command::Calculate { request, at } => match commands::read_input(&request) {
            Ok(body) => commands::calculate::run(config, &body, at),
            Err(result) => result,
        },
        Command::Quote {
            customer,
            books,
            at,
        } => commands::quote::run(config, &customer, &books, at),
        Command::Rules => commands::rules::run(config),
        Command::CheckConfig => commands::check_config::run(config),
    }
}
