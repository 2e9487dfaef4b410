//! Wire-level helpers for the protocols `dbprobe` knows how to poke at.
//!
//! Nothing in here opens sockets. The payloads are plain byte arrays and the
//! reply helpers only look at bytes that were already read.

pub mod postgres;
