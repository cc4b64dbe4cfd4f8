//! Logging setup
//!
//! Logs go to stderr so the generated page can be piped or redirected
//! separately. `RUST_LOG` overrides the configured level.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
