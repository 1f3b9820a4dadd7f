//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a compact stderr logger.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for
/// the wirebody crates.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "wirebody=debug,wirebody_infrastructure=debug,warn"
    } else {
        "wirebody=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
