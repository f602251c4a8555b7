//! Structured logging setup.
//!
//! Logs go to stderr so `config --json` output on stdout stays parseable.
//! The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "deploy_config=info";

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "deploy_config=debug"
    } else {
        DEFAULT_FILTER
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
