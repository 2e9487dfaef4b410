pub mod check;

use std::ffi::OsStr;
use std::time::Duration;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command, Parser};
use dbprobe_common::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT, ProbeConfig};
use dbprobe_common::endpoint::Endpoint;

#[derive(Parser, Debug)]
#[command(name = "dbprobe", version)]
#[command(about = "A one-shot TCP reachability check for database endpoints.")]
pub struct CommandLine {
    /// Host, host:port or connection URL to probe [default: localhost:5432]
    #[arg(env = "DATABASE_URL", hide_env_values = true, value_parser = EndpointParser)]
    pub target: Option<Endpoint>,

    /// Port to probe, overrides the port in TARGET
    #[arg(short, long, env = "DB_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Seconds to wait for the connection and for a reply
    #[arg(
        short,
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Only check TCP reachability, skip the protocol probe
    #[arg(long)]
    pub no_exchange: bool,

    /// More logs (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn probe_config(&self) -> ProbeConfig {
        let host: &str = self
            .target
            .as_ref()
            .map_or(DEFAULT_HOST, |target| target.host.as_str());

        let port: u16 = self
            .port
            .or_else(|| self.target.as_ref().and_then(|target| target.port))
            .unwrap_or(DEFAULT_PORT);

        let cfg = ProbeConfig::new(host, port).with_timeout(Duration::from_secs(self.timeout));
        if self.no_exchange {
            cfg.without_exchange()
        } else {
            cfg
        }
    }
}

/// Parses TARGET without echoing the raw value, which may hold a password.
#[derive(Clone, Debug)]
pub struct EndpointParser;

impl TypedValueParser for EndpointParser {
    type Value = Endpoint;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let name: String = arg.map_or_else(|| "target".to_string(), |arg| arg.get_id().to_string());

        let raw: &str = value.to_str().ok_or_else(|| {
            clap::Error::raw(ErrorKind::InvalidUtf8, format!("'{name}' is not valid UTF-8\n"))
                .with_cmd(cmd)
        })?;

        raw.parse::<Endpoint>().map_err(|err| {
            clap::Error::raw(ErrorKind::ValueValidation, format!("invalid '{name}': {err}\n"))
                .with_cmd(cmd)
        })
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
