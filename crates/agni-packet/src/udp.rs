//! UDP header serialization and checksum.

use std::net::{Ipv4Addr, Ipv6Addr};

use agni_common::{IpVersion, PacketRecord, TransportProtocol};

use crate::checksum::checksum;
use crate::headers::{write_ipv4, write_ipv6, IPV4_HEADER_LEN, IPV6_HEADER_LEN};
use crate::pseudo_header;

pub const UDP_HEADER_LEN: usize = 8;

fn protocol_number(ip_version: IpVersion) -> u8 {
    TransportProtocol::Udp.ip_protocol_number(ip_version)
}

fn write_udp_header(buf: &mut [u8], src_port: u16, dst_port: u16, length: u16) {
    buf[0..2].copy_from_slice(&src_port.to_be_bytes());
    buf[2..4].copy_from_slice(&dst_port.to_be_bytes());
    buf[4..6].copy_from_slice(&length.to_be_bytes());
    buf[6..8].copy_from_slice(&[0, 0]); // checksum placeholder
}

pub fn build_v4(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V4);
    let udp_len = (UDP_HEADER_LEN + payload.len()) as u16;
    let total_len = IPV4_HEADER_LEN + UDP_HEADER_LEN + payload.len();
    let mut bytes = vec![0u8; total_len];

    write_ipv4(&mut bytes[0..IPV4_HEADER_LEN], src, dst, proto, total_len as u16);
    write_udp_header(
        &mut bytes[IPV4_HEADER_LEN..IPV4_HEADER_LEN + UDP_HEADER_LEN],
        src_port,
        dst_port,
        udp_len,
    );
    bytes[IPV4_HEADER_LEN + UDP_HEADER_LEN..].copy_from_slice(payload);

    let ph = pseudo_header::ipv4(src, dst, proto, udp_len);
    let cbuf = [
        ph.as_slice(),
        &bytes[IPV4_HEADER_LEN..IPV4_HEADER_LEN + UDP_HEADER_LEN],
        payload,
    ]
    .concat();
    let c = checksum(&cbuf);
    bytes[IPV4_HEADER_LEN + 6..IPV4_HEADER_LEN + 8].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V4, TransportProtocol::Udp)
}

pub fn build_v6(
    src: Ipv6Addr,
    dst: Ipv6Addr,
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V6);
    let udp_len = (UDP_HEADER_LEN + payload.len()) as u16;
    let mut bytes = vec![0u8; IPV6_HEADER_LEN + UDP_HEADER_LEN + payload.len()];

    write_ipv6(&mut bytes[0..IPV6_HEADER_LEN], src, dst, proto, udp_len);
    write_udp_header(
        &mut bytes[IPV6_HEADER_LEN..IPV6_HEADER_LEN + UDP_HEADER_LEN],
        src_port,
        dst_port,
        udp_len,
    );
    bytes[IPV6_HEADER_LEN + UDP_HEADER_LEN..].copy_from_slice(payload);

    let ph = pseudo_header::ipv6(src, dst, proto, udp_len as u32);
    let cbuf = [
        ph.as_slice(),
        &bytes[IPV6_HEADER_LEN..IPV6_HEADER_LEN + UDP_HEADER_LEN],
        payload,
    ]
    .concat();
    let c = checksum(&cbuf);
    bytes[IPV6_HEADER_LEN + 6..IPV6_HEADER_LEN + 8].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V6, TransportProtocol::Udp)
}
