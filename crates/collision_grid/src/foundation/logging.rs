//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system at `info` unless `RUST_LOG` says otherwise
///
/// Calling this more than once is harmless.
pub fn init() {
    init_with_default("info");
}

/// Initialize the logging system with a fallback filter used when
/// `RUST_LOG` is unset (e.g. `"debug"` or `"collision_grid=trace"`)
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}
