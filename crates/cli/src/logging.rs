//! Diagnostic logging to stderr
//!
//! Generated output owns stdout, so log events always go to stderr.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{registry, Layer};

pub const LOG_FILTER: &str = "RUST_LOG";

/// Filter directive used when `RUST_LOG` is unset or invalid
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

pub fn init_logging(debug: bool) {
    let filter = match std::env::var_os(LOG_FILTER) {
        Some(_) if !debug => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(debug))),
        _ => EnvFilter::new(default_directive(debug)),
    };

    let layer = tracing_subscriber::fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .boxed();

    let subscriber = registry::Registry::default().with(filter).with(layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("✗ Failed to initialize logging");
    }
}
