#![deny(missing_docs)]
//! Shared logging utilities for the relief stream workspace.
//!
//! This crate provides the `relief_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! Every macro accepts either plain `format!` arguments or a leading
//! `session = <id>;` clause, which tags the message with the scrape session
//! it belongs to:
//!
//! ```ignore
//! relief_info!("engine started");
//! relief_debug!(session = 7; "dropped stale chunk of {} bytes", 12);
//! ```

#[doc(hidden)]
pub use log;

/// Formats the `[session N]` prefix used by the session form of the macros.
#[doc(hidden)]
pub fn session_prefix(session_id: u64) -> String {
    format!("[session {session_id}]")
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! relief_trace {
    (session = $sid:expr; $($arg:tt)*) => {{
        $crate::log::trace!("{} {}", $crate::session_prefix($sid), format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! relief_debug {
    (session = $sid:expr; $($arg:tt)*) => {{
        $crate::log::debug!("{} {}", $crate::session_prefix($sid), format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! relief_info {
    (session = $sid:expr; $($arg:tt)*) => {{
        $crate::log::info!("{} {}", $crate::session_prefix($sid), format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! relief_warn {
    (session = $sid:expr; $($arg:tt)*) => {{
        $crate::log::warn!("{} {}", $crate::session_prefix($sid), format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! relief_error {
    (session = $sid:expr; $($arg:tt)*) => {{
        $crate::log::error!("{} {}", $crate::session_prefix($sid), format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
