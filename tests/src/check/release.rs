#![cfg(target_os = "linux")]

use std::time::Duration;

use dbprobe_common::config::ProbeConfig;
use dbprobe_core::{TcpConnector, check};

use crate::util::{self, Behaviour};

const ROUNDS: usize = 25;

/// Gives listener tasks a chance to drop their side of each connection.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

async fn run_all(configs: &[ProbeConfig]) -> Vec<bool> {
    let mut verdicts = Vec::with_capacity(configs.len());
    for cfg in configs {
        verdicts.push(check(&TcpConnector, cfg).await.success());
    }
    verdicts
}

#[tokio::test]
async fn sockets_are_released_on_every_branch() -> anyhow::Result<()> {
    let _serial = util::serial();

    let responsive = util::listener(Behaviour::Reply(b"S")).await?;
    let silent = util::listener(Behaviour::Close).await?;
    let closed = util::closed_port().await?;

    let configs = [
        util::config("127.0.0.1", responsive.port()),
        util::config("127.0.0.1", silent.port()),
        util::config("127.0.0.1", closed),
        util::config("127.0.0.1", responsive.port()).without_exchange(),
    ];

    // First round warms up lazily created runtime resources.
    assert_eq!(run_all(&configs).await, [true, true, false, true]);
    settle().await;
    let baseline = util::open_fds()?;

    for _ in 0..ROUNDS {
        assert_eq!(run_all(&configs).await, [true, true, false, true]);
    }
    settle().await;

    assert_eq!(util::open_fds()?, baseline, "descriptors leaked across {ROUNDS} rounds");
    Ok(())
}
