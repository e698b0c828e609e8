#![deny(missing_docs)]
//! Logging macros shared by the lookup crates.
//!
//! Every record is emitted under [`LOG_TARGET`], so a host can raise or lower
//! lookup output independently of its dependencies (reqwest, hyper, ...).

/// Log target used by the `engine_*` macros.
pub const LOG_TARGET: &str = "lookup";

/// Environment variable that overrides the level chosen by
/// [`initialize_for_tests`], e.g. `LOOKUP_TEST_LOG=trace`.
pub const TEST_LOG_ENV_VAR: &str = "LOOKUP_TEST_LOG";

/// Logs a trace-level message.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Level for test runs: `$LOOKUP_TEST_LOG` if it parses, else debug in debug
/// builds and info otherwise.
pub fn test_level() -> log::LevelFilter {
    std::env::var(TEST_LOG_ENV_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
}

/// Installs a stderr logger for tests.
///
/// No-op if a logger is already installed, so every test may call it.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .add_filter_allow_str(LOG_TARGET)
        .build();
    let _ = TermLogger::init(
        test_level(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
