//! Logging setup
//!
//! Diagnostics go to stderr so command output on stdout stays clean for
//! piping. The filter is taken from `SPENDVIEW_LOG`, then `RUST_LOG`, and
//! otherwise from the `-v` count.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Environment variable holding a filter directive, e.g. `spendview=debug`
pub const LOG_ENV: &str = "SPENDVIEW_LOG";

/// Map a `-v` count to a level: warn, info, then debug
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn resolve_filter(verbosity: u8) -> EnvFilter {
    for key in [LOG_ENV, "RUST_LOG"] {
        if let Ok(directive) = std::env::var(key) {
            if let Ok(filter) = EnvFilter::try_new(&directive) {
                return filter;
            }
        }
    }
    EnvFilter::default().add_directive(level_for_verbosity(verbosity).into())
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(resolve_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
