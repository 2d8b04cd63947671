//! Tracing subscriber setup shared by the binaries.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    // A second call (e.g. from tests) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
