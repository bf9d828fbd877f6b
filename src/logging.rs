//! Diagnostics for the command-line host.
//!
//! Filtering follows `SPELLPICK_LOG` (e.g. `SPELLPICK_LOG=spellpick::checker=debug`),
//! defaulting to warnings only. Output goes to stderr so it never mixes with results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_ENV: &str = "SPELLPICK_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
