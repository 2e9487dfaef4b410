//! # dbprobe core
//!
//! The connectivity check itself. [`prober::check`] runs the whole procedure
//! against any [`network::Connector`] and always hands back a
//! [`prober::ProbeReport`]; nothing in here prints.

pub mod network;
pub mod prober;

pub use network::{Connector, TcpConnector};
pub use prober::{Connected, ExchangeOutcome, ProbeReport, check};
