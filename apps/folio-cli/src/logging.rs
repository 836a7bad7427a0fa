//! Tracing subscriber setup. Libraries only emit events; the binary decides
//! where they go.

use tracing_subscriber::EnvFilter;

use folio_config::LoggingSettings;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured filter. Calling this twice is
/// harmless: the second install is refused and reported on stderr.
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(error) = installed {
        eprintln!("tracing already initialised: {error}");
    }
}
