//! Shared building blocks for every `dbprobe` crate: run configuration, target
//! parsing, the error taxonomy and the logging macros.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod log;

#[doc(hidden)]
pub use tracing;
