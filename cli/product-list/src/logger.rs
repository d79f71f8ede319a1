use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::Verbosity;

/// Filter directives for a verbosity level.
///
/// `RUST_LOG` takes precedence if set.
fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,product_list=error,product_catalog=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,product_list=warn,product_catalog=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,product_list=info,product_catalog=info",
        // Also show debug from the catalog client
        Verbosity::Verbose(2) => "off,product_list=debug,product_catalog=debug",
        Verbosity::Verbose(3) => "off,product_list=trace,product_catalog=trace",
        // Also show trace from HTTP libraries
        Verbosity::Verbose(_) => "trace",
    }
}

pub(crate) fn init_logger(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(fmt::format())
        .with_filter(filter);

    if let Err(err) = tracing_subscriber::registry().with(log_layer).try_init() {
        eprintln!("Initializing logger failed: {err}");
    }
}
