use colored::*;

use crate::mprint;
use crate::terminal::{colors, print, spinner};
use dbprobe_common::config::ProbeConfig;
use dbprobe_common::error::CheckError;
use dbprobe_common::{error, info, success, warn};
use dbprobe_core::{Connected, Connector, ExchangeOutcome, ProbeReport, TcpConnector};

type Detail = (String, ColoredString);

/// Runs one check against `cfg` and prints the report. Returns the verdict.
pub async fn check(cfg: &ProbeConfig) -> bool {
    check_with(&TcpConnector, cfg).await
}

async fn check_with<C: Connector>(connector: &C, cfg: &ProbeConfig) -> bool {
    announce(cfg);

    let report: ProbeReport = {
        let _spinner = spinner::start(format!(
            "Probing TCP connectivity to {}...",
            target_label(&cfg.host, cfg.port).bold()
        ));
        dbprobe_core::check(connector, cfg).await
    };

    match &report.outcome {
        Ok(connected) => {
            print_connected(connected, cfg);
            print_summary(&report, connected);
        }
        Err(err) => print_failure(err, cfg),
    }

    report.success()
}

fn announce(cfg: &ProbeConfig) {
    mprint!(&format!(
        "🔍 Validating connectivity to {}",
        target_label(&cfg.host, cfg.port)
    ));
    print::aligned_line("📍 Host", cfg.host.as_str());
    print::aligned_line("🔌 Port", cfg.port.to_string());
    print::aligned_line(
        "⏱  Timeout",
        format!("{}s", cfg.connect_timeout.as_secs_f64()),
    );
    mprint!();
    mprint!("📡 Probing TCP connectivity...");
}

fn print_connected(connected: &Connected, cfg: &ProbeConfig) {
    success!(
        "TCP connection established to {} in {}",
        connected.addr.to_string().color(colors::ACCENT),
        format!("{}ms", connected.latency.as_millis()).yellow()
    );
    success!("🎯 Port {} is accessible", cfg.port);

    match &connected.exchange {
        ExchangeOutcome::Responded { bytes, reply } => {
            success!("Server responding: {reply} ({bytes} bytes)");
            if !reply.is_postgres() {
                warn!("The reply does not look like PostgreSQL, is this the right port?");
            }
        }
        ExchangeOutcome::Silent => warn!("Server did not respond (may be normal)"),
        ExchangeOutcome::Failed(err) => {
            warn!("Could not get a response from the server (may be normal): {err}")
        }
        ExchangeOutcome::Skipped => info!("Protocol probe skipped"),
    }
}

fn print_summary(report: &ProbeReport, connected: &Connected) {
    mprint!();
    print::header("validation summary");
    print::as_tree_one_level(summary_details(&report.host, report.port, connected));
    mprint!();
    print::centerln(&format!(
        "🎯 {} is ready for connections",
        target_label(&report.host, report.port).bold().green()
    ));
}

/// The exchange is best effort, so the server line only depends on the connect.
fn summary_details(host: &str, port: u16, connected: &Connected) -> Vec<Detail> {
    vec![
        (
            "Hostname".to_string(),
            format!("✅ {} resolved to {}", host, connected.addr.ip()).green(),
        ),
        (
            "Port".to_string(),
            format!("✅ {} accessible", port).green(),
        ),
        ("Server".to_string(), "✅ responding".green()),
    ]
}

fn print_failure(err: &CheckError, cfg: &ProbeConfig) {
    error!("{}", failure_headline(err));

    for hint in failure_hints(err, cfg) {
        print::print_status(hint);
    }
}

fn failure_headline(err: &CheckError) -> String {
    match err {
        CheckError::Resolution { host, .. } => {
            format!("Error: cannot resolve hostname {}", host.bold())
        }
        CheckError::Timeout(_) => "Error: connection timed out".to_string(),
        CheckError::Connect { code, source } => {
            format!("TCP connection error: {} ({source})", code.to_string().bold())
        }
        CheckError::Unexpected(cause) => format!("Unexpected error: {cause:#}"),
    }
}

/// What to look at next, one line each.
fn failure_hints(err: &CheckError, cfg: &ProbeConfig) -> Vec<String> {
    match err {
        CheckError::Resolution { .. } => {
            vec!["🔧 Check that the hostname is correct".to_string()]
        }
        CheckError::Timeout(bound) => vec![format!(
            "🔧 The server did not respond within {} seconds",
            bound.as_secs_f64()
        )],
        CheckError::Connect { .. } => vec![
            "🔧 Possible causes:".to_string(),
            format!("   • Firewall blocking port {}", cfg.port),
            "   • Database service is not running".to_string(),
            "   • Security configuration is rejecting this client".to_string(),
        ],
        CheckError::Unexpected(_) => Vec::new(),
    }
}

fn target_label(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
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
