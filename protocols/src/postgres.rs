//! # PostgreSQL pre-startup probe
//!
//! The probe sent after a successful TCP connect is the `SSLRequest` message: an
//! int32 length (always 8) followed by the magic request code `80877103`
//! (`1234 << 16 | 5679`). A PostgreSQL server answers it with a single byte before
//! any authentication happens, which makes it a cheap "is anybody home" check.
//!
//! Only the first byte of a reply is ever interpreted.

use std::fmt;

/// Magic code carried by an `SSLRequest`.
pub const SSL_REQUEST_CODE: u32 = 80_877_103;

/// Default port of a PostgreSQL server.
pub const DEFAULT_PORT: u16 = 5432;

/// The `SSLRequest` message as sent on the wire.
pub const SSL_REQUEST: [u8; 8] = ssl_request();

const fn ssl_request() -> [u8; 8] {
    let len = 8u32.to_be_bytes();
    let code = SSL_REQUEST_CODE.to_be_bytes();
    [
        len[0], len[1], len[2], len[3], code[0], code[1], code[2], code[3],
    ]
}

/// What the first byte of a server reply says about the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerReply {
    /// `S`: the server is willing to negotiate TLS.
    SslAccepted,
    /// `N`: the server refused TLS but is otherwise talking.
    SslRefused,
    /// `E`: the server sent an error message instead.
    ErrorMessage,
    /// Anything else, carrying the first byte.
    Unrecognized(u8),
}

impl ServerReply {
    /// Classifies a reply. Returns `None` for an empty buffer.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let first = *bytes.first()?;
        Some(match first {
            b'S' => Self::SslAccepted,
            b'N' => Self::SslRefused,
            b'E' => Self::ErrorMessage,
            other => Self::Unrecognized(other),
        })
    }

    /// True when the reply looks like it came from a PostgreSQL server.
    pub fn is_postgres(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ServerReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SslAccepted => write!(f, "TLS negotiation accepted"),
            Self::SslRefused => write!(f, "TLS not offered, plaintext only"),
            Self::ErrorMessage => write!(f, "server answered with an error message"),
            Self::Unrecognized(byte) => write!(f, "unrecognized reply (first byte 0x{byte:02X})"),
        }
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
