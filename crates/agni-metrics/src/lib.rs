//! Agni Metrics - CSV latency sink for the TX/RX correlator

pub mod sink;

pub use sink::save_metrics_to_csv;
