//! Agni Packet - byte-exact Ethernet/IPv4/IPv6/TCP/UDP/ICMP frame synthesis
//!
//! Key features:
//! - Hand-rolled RFC 1071 checksum kernel, no library delegation
//! - Manual struct packing for every header, matching the wire format exactly
//! - Ordered packet list with O(1) append and a stable 1-based id

pub mod builders;
pub mod checksum;
pub mod ethernet;
pub mod headers;
pub mod icmp;
pub mod list;
pub mod pseudo_header;
pub mod tagged_payload;
pub mod tcp;
pub mod udp;

pub use builders::{build_icmp, build_tcp, build_udp};
pub use list::PacketList;
