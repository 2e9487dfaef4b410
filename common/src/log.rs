//! Logging macros used across the workspace.
//!
//! They are thin wrappers over `tracing` so that the terminal formatter in the
//! CLI can pick a symbol per event. `success!` is an `INFO` event on its own
//! target.

/// Target used by [`info!`], [`warn!`] and [`error!`] events.
pub const TARGET: &str = "dbprobe";

/// Target used by [`success!`] events.
pub const SUCCESS_TARGET: &str = "dbprobe::success";

/// Target used for raw terminal lines that must be printed without a prefix.
pub const PRINT_TARGET: &str = "dbprobe::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: $crate::log::TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: $crate::log::TARGET, $($arg)*)
    };
}
