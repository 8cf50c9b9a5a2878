//! Wires template loading, optional pcap dump, and the TX/RX correlator
//! together into one run.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use agni_common::{AgniError, AgniResult};
use agni_packet::PacketList;
use agni_pcap::PcapDump;
use agni_txrx::{txrx_run, TxRxOutcome};
use anyhow::{Context, Result};
use tracing::info;

pub fn run(
    template_file: &Path,
    iface_in: &str,
    iface_out: &str,
    pcap_path: Option<&Path>,
    timeout_ms: u64,
) -> Result<TxRxOutcome> {
    info!(file = %template_file.display(), "loading packet templates");
    let templates = agni_template::load_templates(template_file)
        .with_context(|| format!("failed to load '{}'", template_file.display()))?;

    let mut list = PacketList::new();
    agni_template::expand_into(&templates, &mut list);
    info!(packets = list.len(), "expanded templates into packet list");

    if list.is_empty() {
        return Err(AgniError::EmptyList).context("no packets were built from the template file");
    }

    if let Some(path) = pcap_path {
        dump_pcap(&list, path)?;
    }

    let list = Arc::new(list);
    info!(iface_out, iface_in, timeout_ms, "starting TX/RX correlation");
    let outcome = txrx_run(list, iface_out, iface_in, timeout_ms)
        .context("TX/RX correlation failed")?;

    Ok(outcome)
}

fn dump_pcap(list: &PacketList, path: &Path) -> AgniResult<()> {
    let mut dump = PcapDump::create(path)?;
    let captured_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    dump.write_list(list.iter().map(|rec| rec.bytes.as_slice()), captured_at)?;
    info!(path = %path.display(), "wrote pcap dump");
    Ok(())
}
