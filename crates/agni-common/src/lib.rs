//! Agni Common - shared error and data-model types
//!
//! This crate provides the types and error taxonomy used across the
//! Agni packet generator/injector/correlator workspace.

pub mod error;
pub mod types;

pub use error::{AgniError, AgniResult};
pub use types::{tcp_flags, IpVersion, PacketRecord, TransportProtocol};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
