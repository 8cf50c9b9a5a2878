//! RX worker: capture on the input interface, correlate replies by their
//! tagged id, and manage the grace-timeout window.
//!
//! The timeout window is anchored on TX completion, not on RX-loop entry or
//! the first captured frame — bounding latency after injection finishes
//! rather than including the time RX spent waiting for TX to even start.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pnet_datalink::Channel;

use crate::context::TxRxContext;
use crate::iface::find_interface;
use crate::parse::extract_id;

const CAPTURE_READ_TIMEOUT: Duration = Duration::from_millis(100);

pub fn spawn(ctx: Arc<TxRxContext>, iface_name: String, timeout_ms: u64) -> JoinHandle<()> {
    thread::Builder::new()
        .name("rx-worker".to_string())
        .spawn(move || run(&ctx, &iface_name, timeout_ms))
        .expect("failed to spawn RX worker thread")
}

fn run(ctx: &TxRxContext, iface_name: &str, timeout_ms: u64) {
    let interface = match find_interface(iface_name) {
        Some(i) => i,
        None => {
            tracing::error!(interface = iface_name, "RX: interface not found");
            ctx.mark_timed_out();
            return;
        }
    };

    let config = pnet_datalink::Config {
        read_timeout: Some(CAPTURE_READ_TIMEOUT),
        promiscuous: true,
        ..Default::default()
    };

    let mut rx_channel = match pnet_datalink::channel(&interface, config) {
        Ok(Channel::Ethernet(_tx, rx)) => rx,
        Ok(_) => {
            tracing::error!(interface = iface_name, "RX: unsupported channel type");
            ctx.mark_timed_out();
            return;
        }
        Err(e) => {
            tracing::error!(interface = iface_name, error = %e, "RX: failed to open interface");
            ctx.mark_timed_out();
            return;
        }
    };

    let timeout = Duration::from_millis(timeout_ms);

    loop {
        let t1 = ctx.now_ns();

        match rx_channel.next() {
            Ok(frame) => {
                if let Some(id) = extract_id(frame, ctx.total()) {
                    ctx.record_recv(id, t1);
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(e) => {
                tracing::warn!(error = %e, "RX: capture read error, continuing");
            }
        }

        if ctx.is_done() {
            break;
        }

        if let Some(tx_finished) = ctx.tx_finished_at() {
            if tx_finished.elapsed() >= timeout {
                ctx.mark_timed_out();
                break;
            }
        }
    }
}
