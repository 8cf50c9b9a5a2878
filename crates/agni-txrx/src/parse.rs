//! Captured-frame parsing: Ethernet -> IPv4 -> (TCP|UDP|ICMP) -> tagged id.
//!
//! IPv6 on receive is not parsed — a documented limitation carried over
//! unchanged: frames whose EtherType is `0x86DD` are skipped.

use pnet_packet::ethernet::{EtherTypes, EthernetPacket};
use pnet_packet::ip::IpNextHeaderProtocols;
use pnet_packet::ipv4::Ipv4Packet;
use pnet_packet::Packet;

use agni_packet::tagged_payload;

/// Extract the correlated packet id from a captured Ethernet frame, if it
/// carries a valid `ASCII(id) || '|'` tag within `[1, total]`.
pub fn extract_id(frame: &[u8], total: usize) -> Option<usize> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Ipv4 {
        return None;
    }

    let ip = Ipv4Packet::new(eth.payload())?;
    let l4 = ip.payload();

    let th_len = match ip.get_next_level_protocol() {
        IpNextHeaderProtocols::Tcp => {
            if l4.len() < 20 {
                return None;
            }
            ((l4[12] >> 4) as usize) * 4
        }
        IpNextHeaderProtocols::Udp | IpNextHeaderProtocols::Icmp => 8,
        _ => return None,
    };

    if l4.len() <= th_len {
        return None;
    }
    let payload = &l4[th_len..];

    let (id, _rest) = tagged_payload::parse(payload)?;
    if id < 1 || id > total {
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agni_common::IpVersion;
    use agni_packet::build_udp;

    #[test]
    fn extracts_id_from_udp_frame() {
        let rec = build_udp(IpVersion::V4, "127.0.0.1", "127.0.0.1", 1, 2, b"3|hi").unwrap();
        let mut frame = vec![0u8; 14];
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());
        frame.extend_from_slice(&rec.bytes);

        assert_eq!(extract_id(&frame, 5), Some(3));
    }

    #[test]
    fn rejects_id_out_of_range() {
        let rec = build_udp(IpVersion::V4, "127.0.0.1", "127.0.0.1", 1, 2, b"99|hi").unwrap();
        let mut frame = vec![0u8; 14];
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());
        frame.extend_from_slice(&rec.bytes);

        assert_eq!(extract_id(&frame, 5), None);
    }

    #[test]
    fn rejects_frame_with_missing_separator() {
        let rec = build_udp(IpVersion::V4, "127.0.0.1", "127.0.0.1", 1, 2, b"garbled").unwrap();
        let mut frame = vec![0u8; 14];
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());
        frame.extend_from_slice(&rec.bytes);

        assert_eq!(extract_id(&frame, 5), None);
    }

    #[test]
    fn ipv6_frames_are_skipped() {
        let mut frame = vec![0u8; 14];
        frame[12..14].copy_from_slice(&0x86DDu16.to_be_bytes());
        frame.extend_from_slice(&[0u8; 40]);

        assert_eq!(extract_id(&frame, 5), None);
    }
}
