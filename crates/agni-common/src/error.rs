//! Error types shared across the Agni packet workspace

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgniError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("mismatched IP address families between source and destination")]
    MismatchedAddressFamily,

    #[error("template error: {0}")]
    Template(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("empty packet list")]
    EmptyList,

    #[error("metrics sink error: {0}")]
    Metrics(String),

    #[error("pcap error: {0}")]
    Pcap(String),
}

pub type AgniResult<T> = Result<T, AgniError>;
