//! # Error taxonomy
//!
//! [`CheckError`] covers everything that makes a connectivity check fail.
//! [`ProbeError`] covers the optional exchange after a successful connect and is
//! never fatal: callers keep it for display and move on.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// A failure that turns the overall verdict into "not reachable".
#[derive(Debug, Error)]
pub enum CheckError {
    /// The hostname did not resolve to any address.
    #[error("cannot resolve hostname {host}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: io::Error,
    },

    /// The connect attempt did not finish within the bound.
    #[error("connection timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The connect attempt finished with a nonzero OS status.
    #[error("tcp connection failed with status {code}: {source}")]
    Connect {
        code: i32,
        #[source]
        source: io::Error,
    },

    /// Anything else.
    #[error("{0:#}")]
    Unexpected(#[source] anyhow::Error),
}

impl CheckError {
    /// Builds a [`CheckError::Connect`] from a failed connect, keeping the OS
    /// status. Errors without an OS code have no status to report and become
    /// [`CheckError::Unexpected`].
    pub fn from_connect(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Self::Connect { code, source: err },
            None => Self::Unexpected(anyhow::Error::new(err).context("connect failed")),
        }
    }

    /// The nonzero OS status of a failed connect, if that is what happened.
    pub fn connect_status(&self) -> Option<i32> {
        match self {
            Self::Connect { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A failure during the best-effort exchange after connect.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("sending probe failed: {0}")]
    Send(#[source] io::Error),

    #[error("reading reply failed: {0}")]
    Receive(#[source] io::Error),

    #[error("no reply within {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
