use std::time::Duration;

use dbprobe_protocols::postgres;

/// Host probed when none is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Port probed when none is given.
pub const DEFAULT_PORT: u16 = postgres::DEFAULT_PORT;

/// Bound on the connect attempt and on waiting for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest reply read after sending the probe.
pub const READ_LIMIT: usize = 1024;

/// Everything a single connectivity check needs to know.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    /// How long to wait for a reply once the probe was sent.
    pub exchange_timeout: Duration,
    /// Bytes sent after the connection is established.
    pub payload: Vec<u8>,
    pub read_limit: usize,
    /// Disables the post-connect exchange entirely.
    ///
    /// The verdict never depends on the exchange, so turning it off only
    /// removes information from the report.
    pub exchange: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_TIMEOUT,
            exchange_timeout: DEFAULT_TIMEOUT,
            payload: postgres::SSL_REQUEST.to_vec(),
            read_limit: READ_LIMIT,
            exchange: true,
        }
    }
}

impl ProbeConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Applies the same bound to the connect attempt and the exchange.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.exchange_timeout = timeout;
        self
    }

    pub fn without_exchange(mut self) -> Self {
        self.exchange = false;
        self
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
