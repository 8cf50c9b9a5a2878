//! TX worker: emit the packet list on the output interface in order,
//! stamping a send timestamp per packet.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use agni_packet::PacketList;
use pnet_datalink::Channel;

use crate::context::TxRxContext;
use crate::iface::find_interface;

pub fn spawn(ctx: Arc<TxRxContext>, list: Arc<PacketList>, iface_name: String) -> JoinHandle<()> {
    thread::Builder::new()
        .name("tx-worker".to_string())
        .spawn(move || run(&ctx, &list, &iface_name))
        .expect("failed to spawn TX worker thread")
}

fn run(ctx: &TxRxContext, list: &PacketList, iface_name: &str) {
    let interface = match find_interface(iface_name) {
        Some(i) => i,
        None => {
            tracing::error!(interface = iface_name, "TX: interface not found");
            ctx.mark_tx_finished();
            return;
        }
    };

    let mut tx_channel = match pnet_datalink::channel(&interface, Default::default()) {
        Ok(Channel::Ethernet(tx, _rx)) => tx,
        Ok(_) => {
            tracing::error!(interface = iface_name, "TX: unsupported channel type");
            ctx.mark_tx_finished();
            return;
        }
        Err(e) => {
            tracing::error!(interface = iface_name, error = %e, "TX: failed to open interface");
            ctx.mark_tx_finished();
            return;
        }
    };

    for (idx, packet) in list.iter().enumerate() {
        let t0 = ctx.now_ns();
        match tx_channel.send_to(&packet.bytes, None) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                tracing::warn!(index = idx + 1, error = %e, "TX: send failed, continuing");
            }
            None => {
                tracing::warn!(index = idx + 1, "TX: channel reported no result, continuing");
            }
        }
        ctx.record_send(idx, t0);
        thread::sleep(Duration::from_millis(1));
    }

    ctx.mark_tx_finished();
}
