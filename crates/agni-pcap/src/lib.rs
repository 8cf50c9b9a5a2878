//! Agni Pcap - libpcap-format dump of a built packet list
//!
//! Used as a black box per the external-interface contract: any conformant
//! writer may stand in for it. Backed by the independent `pcap-file` crate
//! (read/write of the pcap format itself, not libpcap bindings, since this
//! workspace never captures via libpcap).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use agni_common::{AgniError, AgniResult};
use pcap_file::pcap::{PcapHeader, PcapPacket, PcapWriter};
use pcap_file::DataLink;

const SNAPLEN: u32 = 65535;

/// An open pcap dump file, one record per packet.
pub struct PcapDump {
    writer: PcapWriter<BufWriter<File>>,
}

impl PcapDump {
    /// Create (or truncate) a pcap file at `path` with link type Ethernet.
    pub fn create(path: &Path) -> AgniResult<Self> {
        let file = File::create(path)?;
        let header = PcapHeader {
            datalink: DataLink::ETHERNET,
            snaplen: SNAPLEN,
            ..Default::default()
        };
        let writer = PcapWriter::with_header(BufWriter::new(file), header)
            .map_err(|e| AgniError::Pcap(e.to_string()))?;
        Ok(Self { writer })
    }

    /// Append one frame, stamped with `timestamp` (time since the Unix epoch).
    pub fn write_packet(&mut self, bytes: &[u8], timestamp: Duration) -> AgniResult<()> {
        let packet = PcapPacket::new(timestamp, bytes.len() as u32, bytes);
        self.writer
            .write_packet(&packet)
            .map_err(|e| AgniError::Pcap(e.to_string()))
    }

    /// Dump every packet in `list`, tagging each with `captured_at` (all
    /// records share one capture timestamp, matching the original writer's
    /// black-box behavior of stamping at dump time rather than send time).
    pub fn write_list<'a>(
        &mut self,
        packets: impl Iterator<Item = &'a [u8]>,
        captured_at: Duration,
    ) -> AgniResult<()> {
        for bytes in packets {
            self.write_packet(bytes, captured_at)?;
        }
        Ok(())
    }
}
