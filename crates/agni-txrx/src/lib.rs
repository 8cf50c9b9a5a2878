//! TX/RX correlator: injects a packet list on one interface, captures
//! replies on another, and correlates them by their tagged id.

mod context;
mod coordinator;
mod iface;
mod parse;
mod rx;
mod tx;

pub use coordinator::{txrx_run, TxRxOutcome};
