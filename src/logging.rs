// src/logging.rs
// =============================================================================
// Sets up tracing output on stderr. With --json, stdout carries only the
// report; main.rs moves its summary lines to stderr as well.
//
// RUST_LOG wins when set, e.g. RUST_LOG=site2pdf=debug. Otherwise -v picks
// debug and the default is info.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "site2pdf=debug" } else { "site2pdf=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
