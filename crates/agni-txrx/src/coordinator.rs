//! Coordinator: owns the TX/RX context lifecycle, starts both workers in
//! the order that avoids dropping the first packets, waits for completion,
//! and writes the latency CSV.

use std::sync::Arc;
use std::time::Duration;

use agni_common::{AgniError, AgniResult};
use agni_packet::PacketList;
use chrono::Local;

use crate::context::TxRxContext;
use crate::{rx, tx};

const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// Grace period ensuring RX has entered its capture loop before TX begins.
const RX_WARMUP: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct TxRxOutcome {
    pub sent: usize,
    pub received: usize,
    pub lost: usize,
    pub loss_percent: f64,
    pub metrics_path: Option<std::path::PathBuf>,
}

/// Run one TX/RX correlation pass over `list`. `timeout_ms == 0` means "use
/// the default 5000 ms grace window".
pub fn txrx_run(
    list: Arc<PacketList>,
    iface_out: &str,
    iface_in: &str,
    timeout_ms: u64,
) -> AgniResult<TxRxOutcome> {
    if list.is_empty() {
        return Err(AgniError::EmptyList);
    }

    let timeout_ms = if timeout_ms == 0 {
        DEFAULT_TIMEOUT_MS
    } else {
        timeout_ms
    };

    let total = list.len();
    let ctx = Arc::new(TxRxContext::new(total));
    let captured_at = Local::now();

    let rx_handle = rx::spawn(Arc::clone(&ctx), iface_in.to_string(), timeout_ms);
    std::thread::sleep(RX_WARMUP);

    let tx_handle = tx::spawn(Arc::clone(&ctx), Arc::clone(&list), iface_out.to_string());

    ctx.wait_for_completion();

    tx_handle.join().expect("TX worker panicked");
    rx_handle.join().expect("RX worker panicked");

    let ctx = Arc::try_unwrap(ctx).expect("both workers joined, context must be uniquely owned");
    let (send_ts, recv_ts) = ctx.into_arrays();

    let received = recv_ts.iter().filter(|&&t| t != 0).count();
    let lost = total - received;
    let loss_percent = (lost as f64 / total as f64) * 100.0;

    tracing::info!(
        sent = total,
        received,
        lost,
        loss_percent,
        "TX/RX correlation complete"
    );

    let metrics_path = match agni_metrics::save_metrics_to_csv(&send_ts, &recv_ts, captured_at) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "failed to write latency metrics");
            None
        }
    };

    Ok(TxRxOutcome {
        sent: total,
        received,
        lost,
        loss_percent,
        metrics_path,
    })
}
