//! Tracing subscriber setup

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Filter directive for the configured level. `RUST_LOG` wins when set;
/// `verbose` forces debug for this crate.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("warn,travelbuddi={level}")
}

/// Install the global subscriber once. Later calls are no-ops.
pub fn init(config: &LoggingConfig, verbose: bool) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let result = if config.format == "json" {
            builder
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .try_init()
        } else {
            builder.with_target(false).try_init()
        };

        // a host application may already own the global subscriber
        if let Err(e) = result {
            eprintln!("Tracing already initialised: {e}");
        }
    });
}
