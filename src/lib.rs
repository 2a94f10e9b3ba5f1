pub mod actions;
pub mod auth;
pub mod config;
pub mod http;
pub mod models;
pub mod storage;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Output goes to stderr so stdout stays
/// machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
