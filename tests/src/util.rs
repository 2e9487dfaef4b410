use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use dbprobe_common::config::ProbeConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static NET_LOCK: Mutex<()> = Mutex::new(());

/// Tests touching sockets run one at a time so descriptor counts stay honest.
pub fn serial() -> MutexGuard<'static, ()> {
    NET_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// How a local listener treats each accepted connection.
#[derive(Clone, Copy)]
pub enum Behaviour {
    /// Reads the 8-byte probe and answers with these bytes.
    Reply(&'static [u8]),
    /// Reads the probe and closes without answering.
    Close,
    /// Keeps the connection open without ever answering.
    Hold,
}

/// Binds a listener on loopback and serves every connection with `behaviour`.
pub async fn listener(behaviour: Behaviour) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _peer)) = listener.accept().await {
            let mut probe = [0u8; 8];
            match behaviour {
                Behaviour::Reply(reply) => {
                    if stream.read_exact(&mut probe).await.is_ok() {
                        let _ = stream.write_all(reply).await;
                    }
                }
                Behaviour::Close => {
                    let _ = stream.read_exact(&mut probe).await;
                }
                Behaviour::Hold => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        drop(stream);
                    });
                }
            }
        }
    });

    Ok(addr)
}

/// A loopback port nothing listens on.
pub async fn closed_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

pub fn config(host: &str, port: u16) -> ProbeConfig {
    ProbeConfig::new(host, port).with_timeout(Duration::from_millis(500))
}

/// Number of descriptors this process holds open.
#[cfg(target_os = "linux")]
pub fn open_fds() -> anyhow::Result<usize> {
    Ok(std::fs::read_dir("/proc/self/fd")?.count())
}
