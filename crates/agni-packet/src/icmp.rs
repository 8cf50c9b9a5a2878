//! ICMP / ICMPv6 header serialization and checksum.
//!
//! IPv4 ICMP checksums cover only the ICMP header and payload. ICMPv6
//! checksums additionally cover the IPv6 pseudo-header.

use std::net::{Ipv4Addr, Ipv6Addr};

use agni_common::{IpVersion, PacketRecord, TransportProtocol};

use crate::checksum::checksum;
use crate::headers::{write_ipv4, write_ipv6, IPV4_HEADER_LEN, IPV6_HEADER_LEN};
use crate::pseudo_header;

pub const ICMP_HEADER_LEN: usize = 8;

fn protocol_number(ip_version: IpVersion) -> u8 {
    TransportProtocol::Icmp.ip_protocol_number(ip_version)
}

fn write_icmp_header(buf: &mut [u8], icmp_type: u8, code: u8, id: u16, seq: u16) {
    buf[0] = icmp_type;
    buf[1] = code;
    buf[2..4].copy_from_slice(&[0, 0]); // checksum placeholder
    buf[4..6].copy_from_slice(&id.to_be_bytes());
    buf[6..8].copy_from_slice(&seq.to_be_bytes());
}

pub fn build_v4(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    icmp_type: u8,
    code: u8,
    id: u16,
    seq: u16,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V4);
    let total_len = IPV4_HEADER_LEN + ICMP_HEADER_LEN + payload.len();
    let mut bytes = vec![0u8; total_len];

    write_ipv4(&mut bytes[0..IPV4_HEADER_LEN], src, dst, proto, total_len as u16);
    write_icmp_header(
        &mut bytes[IPV4_HEADER_LEN..IPV4_HEADER_LEN + ICMP_HEADER_LEN],
        icmp_type,
        code,
        id,
        seq,
    );
    bytes[IPV4_HEADER_LEN + ICMP_HEADER_LEN..].copy_from_slice(payload);

    let c = checksum(&bytes[IPV4_HEADER_LEN..]);
    bytes[IPV4_HEADER_LEN + 2..IPV4_HEADER_LEN + 4].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V4, TransportProtocol::Icmp)
}

pub fn build_v6(
    src: Ipv6Addr,
    dst: Ipv6Addr,
    icmp_type: u8,
    code: u8,
    id: u16,
    seq: u16,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V6);
    let l4_len = ICMP_HEADER_LEN + payload.len();
    let mut bytes = vec![0u8; IPV6_HEADER_LEN + l4_len];

    write_ipv6(&mut bytes[0..IPV6_HEADER_LEN], src, dst, proto, l4_len as u16);
    write_icmp_header(
        &mut bytes[IPV6_HEADER_LEN..IPV6_HEADER_LEN + ICMP_HEADER_LEN],
        icmp_type,
        code,
        id,
        seq,
    );
    bytes[IPV6_HEADER_LEN + ICMP_HEADER_LEN..].copy_from_slice(payload);

    let ph = pseudo_header::ipv6(src, dst, proto, l4_len as u32);
    let cbuf = [ph.as_slice(), &bytes[IPV6_HEADER_LEN..]].concat();
    let c = checksum(&cbuf);
    bytes[IPV6_HEADER_LEN + 2..IPV6_HEADER_LEN + 4].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V6, TransportProtocol::Icmp)
}
