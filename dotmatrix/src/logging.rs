//! Logging setup shared by the demo applications
//!
//! Output goes to stderr. The level is controlled by the `DOTMATRIX_LOG`
//! environment variable and defaults to `info` for the calling crate.
//!
//! ```bash
//! DOTMATRIX_LOG=debug cargo run -p dotmarquee
//! DOTMATRIX_LOG=dotmatrix=trace cargo run -p dotcalendar
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "DOTMATRIX_LOG";

/// Install the global subscriber. `default_directive` is used when
/// `DOTMATRIX_LOG` is unset or invalid, e.g. `"dotmarquee=info,warn"`.
/// Calling it twice keeps the first subscriber.
pub fn init(default_directive: &str) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();

    if installed.is_ok() {
        tracing::debug!(env = LOG_ENV, "logging initialized");
    }
}
