//! Top-level frame builders: parse presentation-format addresses under a
//! caller-declared IP version and dispatch to the per-protocol,
//! per-IP-version header serializers.

use std::net::IpAddr;
use std::str::FromStr;

use agni_common::{AgniError, AgniResult, IpVersion, PacketRecord};

use crate::{icmp, tcp, udp};

/// Parse `src_ip`/`dst_ip` and confirm both belong to `ip_version` — the
/// family is declared by the caller (a template's `protocol_family`), not
/// guessed from the address text, so a v4-looking address under a
/// declared `ipv6` family is rejected rather than silently overriding it.
fn parse_pair(ip_version: IpVersion, src_ip: &str, dst_ip: &str) -> AgniResult<(IpAddr, IpAddr)> {
    let src = IpAddr::from_str(src_ip).map_err(|_| AgniError::InvalidAddress(src_ip.to_string()))?;
    let dst = IpAddr::from_str(dst_ip).map_err(|_| AgniError::InvalidAddress(dst_ip.to_string()))?;

    let matches = |addr: &IpAddr| matches!((addr, ip_version), (IpAddr::V4(_), IpVersion::V4) | (IpAddr::V6(_), IpVersion::V6));
    if !matches(&src) || !matches(&dst) {
        return Err(AgniError::MismatchedAddressFamily);
    }
    Ok((src, dst))
}

#[allow(clippy::too_many_arguments)]
pub fn build_tcp(
    ip_version: IpVersion,
    src_ip: &str,
    dst_ip: &str,
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    flags: u8,
    payload: &[u8],
) -> AgniResult<PacketRecord> {
    let (src, dst) = parse_pair(ip_version, src_ip, dst_ip)?;
    Ok(match (src, dst) {
        (IpAddr::V4(s), IpAddr::V4(d)) => tcp::build_v4(s, d, src_port, dst_port, seq, ack, flags, payload),
        (IpAddr::V6(s), IpAddr::V6(d)) => tcp::build_v6(s, d, src_port, dst_port, seq, ack, flags, payload),
        _ => unreachable!("parse_pair enforces matching address families"),
    })
}

pub fn build_udp(
    ip_version: IpVersion,
    src_ip: &str,
    dst_ip: &str,
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> AgniResult<PacketRecord> {
    let (src, dst) = parse_pair(ip_version, src_ip, dst_ip)?;
    Ok(match (src, dst) {
        (IpAddr::V4(s), IpAddr::V4(d)) => udp::build_v4(s, d, src_port, dst_port, payload),
        (IpAddr::V6(s), IpAddr::V6(d)) => udp::build_v6(s, d, src_port, dst_port, payload),
        _ => unreachable!("parse_pair enforces matching address families"),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn build_icmp(
    ip_version: IpVersion,
    src_ip: &str,
    dst_ip: &str,
    icmp_type: u8,
    code: u8,
    id: u16,
    seq: u16,
    payload: &[u8],
) -> AgniResult<PacketRecord> {
    let (src, dst) = parse_pair(ip_version, src_ip, dst_ip)?;
    Ok(match (src, dst) {
        (IpAddr::V4(s), IpAddr::V4(d)) => icmp::build_v4(s, d, icmp_type, code, id, seq, payload),
        (IpAddr::V6(s), IpAddr::V6(d)) => icmp::build_v6(s, d, icmp_type, code, id, seq, payload),
        _ => unreachable!("parse_pair enforces matching address families"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_families_is_rejected() {
        let err = build_udp(IpVersion::V4, "127.0.0.1", "::1", 1, 2, b"").unwrap_err();
        assert!(matches!(err, AgniError::MismatchedAddressFamily));
    }

    #[test]
    fn address_not_matching_declared_family_is_rejected() {
        let err = build_udp(IpVersion::V6, "127.0.0.1", "::1", 1, 2, b"").unwrap_err();
        assert!(matches!(err, AgniError::MismatchedAddressFamily));
    }

    #[test]
    fn invalid_address_is_rejected() {
        let err = build_udp(IpVersion::V4, "not-an-ip", "127.0.0.1", 1, 2, b"").unwrap_err();
        assert!(matches!(err, AgniError::InvalidAddress(_)));
    }

    #[test]
    fn builds_ipv4_udp_packet() {
        let rec = build_udp(IpVersion::V4, "127.0.0.1", "127.0.0.1", 1, 2, b"1|hi").unwrap();
        assert_eq!(rec.bytes.len(), 20 + 8 + 4);
    }
}
