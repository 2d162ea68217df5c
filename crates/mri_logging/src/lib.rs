#![deny(missing_docs)]
//! Shared logging utilities for the MRI scan workspace.
//!
//! Every crate logs through the `mri_*` macros below so the facade can be
//! swapped in one place. The binary installs the real logger; tests call
//! [`initialize_for_tests`].

use std::sync::atomic::{AtomicU64, Ordering};

static INTERACTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Advances the interaction sequence counter and returns the new value.
///
/// The console bumps this once per user command so log lines emitted while
/// handling that command can be correlated.
pub fn next_interaction() -> u64 {
    INTERACTION_SEQ.fetch_add(1, Ordering::Relaxed) + 1
}

/// Returns the current interaction sequence number (0 before the first command).
pub fn current_interaction() -> u64 {
    INTERACTION_SEQ.load(Ordering::Relaxed)
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! mri_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! mri_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! mri_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! mri_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! mri_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::{current_interaction, initialize_for_tests, next_interaction};

    #[test]
    fn interaction_counter_is_monotonic() {
        let first = next_interaction();
        let second = next_interaction();
        assert!(second > first);
        assert!(current_interaction() >= second);
    }

    #[test]
    fn repeated_test_initialization_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        mri_info!("logger initialized twice without panicking");
    }
}
