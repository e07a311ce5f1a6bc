#![deny(missing_docs)]
//! Shared logging utilities for the reveal workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! stamped with the page runtime's virtual clock so that timer and observer
//! activity can be read back as a timeline.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the page runtime's virtual clock, in milliseconds.
    static PAGE_CLOCK_MS: Cell<u64> = const { Cell::new(0) };
}

/// Sets the virtual page clock for the current thread.
/// The page runtime calls this whenever its clock moves.
pub fn set_page_clock_ms(now_ms: u64) {
    PAGE_CLOCK_MS.with(|v| v.set(now_ms));
}

/// Retrieves the virtual page clock for the current thread.
/// Returns 0 if no runtime has advanced the clock yet.
pub fn page_clock_ms() -> u64 {
    PAGE_CLOCK_MS.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[t={}ms] {}", $crate::page_clock_ms(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[t={}ms] {}", $crate::page_clock_ms(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[t={}ms] {}", $crate::page_clock_ms(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[t={}ms] {}", $crate::page_clock_ms(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[t={}ms] {}", $crate::page_clock_ms(), format_args!($($arg)*));
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
