//! TCP header serialization and checksum.

use std::net::{Ipv4Addr, Ipv6Addr};

use agni_common::{IpVersion, PacketRecord, TransportProtocol};

use crate::checksum::checksum;
use crate::headers::{write_ipv4, write_ipv6, IPV4_HEADER_LEN, IPV6_HEADER_LEN};
use crate::pseudo_header;

pub const TCP_HEADER_LEN: usize = 20;

fn protocol_number(ip_version: IpVersion) -> u8 {
    TransportProtocol::Tcp.ip_protocol_number(ip_version)
}

fn write_tcp_header(
    buf: &mut [u8],
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    flags: u8,
) {
    buf[0..2].copy_from_slice(&src_port.to_be_bytes());
    buf[2..4].copy_from_slice(&dst_port.to_be_bytes());
    buf[4..8].copy_from_slice(&seq.to_be_bytes());
    buf[8..12].copy_from_slice(&ack.to_be_bytes());
    let data_offset_flags: u16 = (5u16 << 12) | flags as u16;
    buf[12..14].copy_from_slice(&data_offset_flags.to_be_bytes());
    buf[14..16].copy_from_slice(&5840u16.to_be_bytes()); // window
    buf[16..18].copy_from_slice(&[0, 0]); // checksum placeholder
    buf[18..20].copy_from_slice(&[0, 0]); // urgent pointer
}

pub fn build_v4(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    flags: u8,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V4);
    let total_len = IPV4_HEADER_LEN + TCP_HEADER_LEN + payload.len();
    let mut bytes = vec![0u8; total_len];

    write_ipv4(&mut bytes[0..IPV4_HEADER_LEN], src, dst, proto, total_len as u16);
    write_tcp_header(
        &mut bytes[IPV4_HEADER_LEN..IPV4_HEADER_LEN + TCP_HEADER_LEN],
        src_port,
        dst_port,
        seq,
        ack,
        flags,
    );
    bytes[IPV4_HEADER_LEN + TCP_HEADER_LEN..].copy_from_slice(payload);

    let ph = pseudo_header::ipv4(src, dst, proto, (TCP_HEADER_LEN + payload.len()) as u16);
    let cbuf = [
        ph.as_slice(),
        &bytes[IPV4_HEADER_LEN..IPV4_HEADER_LEN + TCP_HEADER_LEN],
        payload,
    ]
    .concat();
    let c = checksum(&cbuf);
    bytes[IPV4_HEADER_LEN + 16..IPV4_HEADER_LEN + 18].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V4, TransportProtocol::Tcp)
}

pub fn build_v6(
    src: Ipv6Addr,
    dst: Ipv6Addr,
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    flags: u8,
    payload: &[u8],
) -> PacketRecord {
    let proto = protocol_number(IpVersion::V6);
    let l4_len = TCP_HEADER_LEN + payload.len();
    let mut bytes = vec![0u8; IPV6_HEADER_LEN + l4_len];

    write_ipv6(&mut bytes[0..IPV6_HEADER_LEN], src, dst, proto, l4_len as u16);
    write_tcp_header(
        &mut bytes[IPV6_HEADER_LEN..IPV6_HEADER_LEN + TCP_HEADER_LEN],
        src_port,
        dst_port,
        seq,
        ack,
        flags,
    );
    bytes[IPV6_HEADER_LEN + TCP_HEADER_LEN..].copy_from_slice(payload);

    let ph = pseudo_header::ipv6(src, dst, proto, l4_len as u32);
    let cbuf = [
        ph.as_slice(),
        &bytes[IPV6_HEADER_LEN..IPV6_HEADER_LEN + TCP_HEADER_LEN],
        payload,
    ]
    .concat();
    let c = checksum(&cbuf);
    bytes[IPV6_HEADER_LEN + 16..IPV6_HEADER_LEN + 18].copy_from_slice(&c.to_be_bytes());

    PacketRecord::new(bytes, IpVersion::V6, TransportProtocol::Tcp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agni_common::tcp_flags;

    #[test]
    fn v4_syn_packet_fields() {
        let src = Ipv4Addr::new(192, 168, 1, 1);
        let dst = Ipv4Addr::new(192, 168, 1, 2);
        let rec = build_v4(src, dst, 12345, 80, 1000, 0, tcp_flags::SYN, b"");

        assert_eq!(rec.bytes.len(), 40);
        assert_eq!(rec.bytes[0] >> 4, 4);
        assert_eq!(rec.bytes[9], 6);
        let dof = u16::from_be_bytes([rec.bytes[32], rec.bytes[33]]);
        assert_eq!(dof >> 12, 5);
        assert_eq!((dof & 0xff) as u8, tcp_flags::SYN);
    }

    #[test]
    fn v4_checksum_is_self_consistent() {
        let src = Ipv4Addr::new(10, 0, 0, 1);
        let dst = Ipv4Addr::new(10, 0, 0, 2);
        let rec = build_v4(src, dst, 1, 2, 0, 0, tcp_flags::SYN, b"payload");

        let ph = pseudo_header::ipv4(src, dst, 6, (TCP_HEADER_LEN + 7) as u16);
        let cbuf = [ph.as_slice(), &rec.bytes[20..]].concat();
        assert_eq!(checksum(&cbuf), 0);
    }

    #[test]
    fn v6_next_header_is_tcp() {
        let rec = build_v6(
            Ipv6Addr::LOCALHOST,
            Ipv6Addr::LOCALHOST,
            1,
            2,
            0,
            0,
            tcp_flags::ACK,
            b"",
        );
        assert_eq!(rec.bytes[6], 6);
        assert_eq!(rec.bytes.len(), 60);
    }
}
