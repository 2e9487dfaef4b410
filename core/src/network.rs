//! Network access behind a trait so the prober can run against real sockets or
//! scripted streams.

pub mod tcp;

pub use tcp::{Connector, TcpConnector};
