use std::io;
use std::net::SocketAddr;

use anyhow::Context;
use async_trait::async_trait;
use dbprobe_common::error::CheckError;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpSocket, TcpStream, lookup_host};
use tracing::debug;

/// Resolves names and opens streams for the prober.
///
/// Timeouts are not the connector's business: the prober bounds
/// [`Connector::connect`] itself.
#[async_trait]
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Every address `host` resolves to, paired with `port`.
    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, CheckError>;

    /// Opens a stream to `addr`.
    ///
    /// A refused or unreachable peer is [`CheckError::Connect`] with the OS
    /// status; failing to create the socket at all is
    /// [`CheckError::Unexpected`].
    async fn connect(&self, addr: SocketAddr) -> Result<Self::Stream, CheckError>;
}

/// The real thing: system resolver and plain TCP sockets.
#[derive(Clone, Copy, Debug, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, CheckError> {
        let addrs: Vec<SocketAddr> = lookup_host((host, port))
            .await
            .map_err(|source| CheckError::Resolution {
                host: host.to_string(),
                source,
            })?
            .collect();

        debug!(host, count = addrs.len(), "resolved");
        Ok(addrs)
    }

    async fn connect(&self, addr: SocketAddr) -> Result<Self::Stream, CheckError> {
        let socket = open_socket(&addr)
            .with_context(|| format!("creating socket for {addr}"))
            .map_err(CheckError::Unexpected)?;

        debug!(%addr, "connecting");
        socket.connect(addr).await.map_err(CheckError::from_connect)
    }
}

fn open_socket(addr: &SocketAddr) -> io::Result<TcpSocket> {
    match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
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
