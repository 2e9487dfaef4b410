//! # Connectivity Prober
//!
//! One linear procedure: resolve, connect within a bound, optionally exchange a
//! few bytes, report.
//!
//! The verdict is decided by the connect alone. The exchange after it is best
//! effort: whatever happens there is recorded in [`ExchangeOutcome`] and the
//! verdict stays "reachable".
//!
//! The stream is owned by [`check`] and dropped before it returns, on every
//! path.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use dbprobe_common::config::ProbeConfig;
use dbprobe_common::error::{CheckError, ProbeError};
use dbprobe_protocols::postgres::ServerReply;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, info_span, Instrument};

use crate::network::Connector;

/// Result of one connectivity check.
#[derive(Debug)]
pub struct ProbeReport {
    pub host: String,
    pub port: u16,
    pub outcome: Result<Connected, CheckError>,
}

impl ProbeReport {
    /// True when the TCP connection was established.
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// What is known once the TCP connection was established.
#[derive(Debug)]
pub struct Connected {
    pub addr: SocketAddr,
    pub latency: Duration,
    pub exchange: ExchangeOutcome,
}

/// How the best-effort exchange after connect went.
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// The server sent something back.
    Responded { bytes: usize, reply: ServerReply },
    /// The server closed the stream without sending anything.
    Silent,
    /// Sending or receiving failed. Kept for display, never fatal.
    Failed(ProbeError),
    /// The exchange was disabled.
    Skipped,
}

/// Runs a full connectivity check described by `cfg`.
pub async fn check<C: Connector>(connector: &C, cfg: &ProbeConfig) -> ProbeReport {
    let span = info_span!("check", host = %cfg.host, port = cfg.port);
    let outcome = establish(connector, cfg).instrument(span).await;

    if let Err(err) = &outcome {
        debug!(error = %err, "check failed");
    }

    ProbeReport {
        host: cfg.host.clone(),
        port: cfg.port,
        outcome,
    }
}

async fn establish<C: Connector>(
    connector: &C,
    cfg: &ProbeConfig,
) -> Result<Connected, CheckError> {
    let addrs = connector.resolve(&cfg.host, cfg.port).await?;
    let addr = preferred_address(&addrs).ok_or_else(|| CheckError::Resolution {
        host: cfg.host.clone(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"),
    })?;

    let started = Instant::now();
    let mut stream = timeout(cfg.connect_timeout, connector.connect(addr))
        .await
        .map_err(|_elapsed| CheckError::Timeout(cfg.connect_timeout))??;
    let latency = started.elapsed();
    debug!(%addr, ?latency, "connected");

    let exchange = if cfg.exchange {
        run_exchange(&mut stream, cfg).await
    } else {
        ExchangeOutcome::Skipped
    };

    Ok(Connected {
        addr,
        latency,
        exchange,
    })
}

/// First IPv4 address if there is one, else the first address.
pub fn preferred_address(addrs: &[SocketAddr]) -> Option<SocketAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

async fn run_exchange<S>(stream: &mut S, cfg: &ProbeConfig) -> ExchangeOutcome
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match send_and_receive(stream, cfg).await {
        Ok(reply) => match ServerReply::from_bytes(&reply) {
            Some(kind) => ExchangeOutcome::Responded {
                bytes: reply.len(),
                reply: kind,
            },
            None => ExchangeOutcome::Silent,
        },
        Err(err) => {
            debug!(error = %err, "protocol probe failed, ignoring");
            ExchangeOutcome::Failed(err)
        }
    }
}

async fn send_and_receive<S>(stream: &mut S, cfg: &ProbeConfig) -> Result<Vec<u8>, ProbeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(&cfg.payload).await.map_err(ProbeError::Send)?;
    stream.flush().await.map_err(ProbeError::Send)?;

    let mut buffer = vec![0u8; cfg.read_limit];
    let read = timeout(cfg.exchange_timeout, stream.read(&mut buffer))
        .await
        .map_err(|_elapsed| ProbeError::Timeout(cfg.exchange_timeout))?
        .map_err(ProbeError::Receive)?;

    buffer.truncate(read);
    Ok(buffer)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
