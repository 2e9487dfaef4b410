use std::time::Duration;

use dbprobe_common::error::{CheckError, ProbeError};
use dbprobe_core::{ExchangeOutcome, ProbeReport, TcpConnector, check};
use dbprobe_protocols::postgres::ServerReply;

use crate::util::{self, Behaviour};

/// A listener answering the probe like a PostgreSQL server without TLS.
#[tokio::test]
async fn responsive_listener_is_reachable() -> anyhow::Result<()> {
    let _serial = util::serial();
    let addr = util::listener(Behaviour::Reply(b"N")).await?;

    let report: ProbeReport = check(&TcpConnector, &util::config("localhost", addr.port())).await;

    assert!(report.success(), "expected success: {:?}", report.outcome);
    let connected = report.outcome.as_ref().expect("connected");
    assert_eq!(connected.addr, addr);
    assert!(matches!(
        connected.exchange,
        ExchangeOutcome::Responded { bytes: 1, reply: ServerReply::SslRefused }
    ));
    Ok(())
}

#[tokio::test]
async fn silent_listener_is_still_reachable() -> anyhow::Result<()> {
    let _serial = util::serial();
    let addr = util::listener(Behaviour::Close).await?;

    let report = check(&TcpConnector, &util::config("127.0.0.1", addr.port())).await;

    assert!(report.success());
    assert!(matches!(report.outcome?.exchange, ExchangeOutcome::Silent));
    Ok(())
}

#[tokio::test]
async fn mute_listener_is_still_reachable() -> anyhow::Result<()> {
    let _serial = util::serial();
    let addr = util::listener(Behaviour::Hold).await?;

    let report = check(&TcpConnector, &util::config("127.0.0.1", addr.port())).await;

    assert!(report.success());
    assert!(matches!(
        report.outcome?.exchange,
        ExchangeOutcome::Failed(ProbeError::Timeout(_))
    ));
    Ok(())
}

#[tokio::test]
async fn exchange_can_be_skipped() -> anyhow::Result<()> {
    let _serial = util::serial();
    let addr = util::listener(Behaviour::Hold).await?;
    let cfg = util::config("127.0.0.1", addr.port()).without_exchange();

    let report = check(&TcpConnector, &cfg).await;

    assert!(matches!(report.outcome?.exchange, ExchangeOutcome::Skipped));
    Ok(())
}

#[tokio::test]
async fn closed_port_reports_connect_status() -> anyhow::Result<()> {
    let _serial = util::serial();
    let port = util::closed_port().await?;

    let report = check(&TcpConnector, &util::config("localhost", port)).await;

    assert!(!report.success());
    let err = report.outcome.expect_err("closed port must fail");
    let code = err.connect_status().expect("connect status");
    assert_ne!(code, 0);
    assert!(err.to_string().contains(&code.to_string()), "got: {err}");
    Ok(())
}

#[tokio::test]
async fn unresolvable_host_reports_resolution() {
    let _serial = util::serial();
    let report = check(&TcpConnector, &util::config("no-such-host.invalid", 5432)).await;

    assert!(!report.success());
    match report.outcome {
        Err(CheckError::Resolution { host, .. }) => assert_eq!(host, "no-such-host.invalid"),
        other => panic!("expected resolution error, got {other:?}"),
    }
}

/// Depends on the network dropping packets to a non-routable address.
#[tokio::test]
#[ignore]
async fn blackholed_host_times_out() {
    let _serial = util::serial();
    let cfg = util::config("10.255.255.1", 5432).with_timeout(Duration::from_millis(300));

    let report = check(&TcpConnector, &cfg).await;

    assert!(matches!(
        report.outcome,
        Err(CheckError::Timeout(bound)) if bound == Duration::from_millis(300)
    ));
}
