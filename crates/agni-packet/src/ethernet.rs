//! Ethernet L2 wrapper, applied exactly once per packet at list-insertion time.

use agni_common::IpVersion;

pub const ETHERNET_HEADER_LEN: usize = 14;

const DST_MAC: [u8; 6] = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
const SRC_MAC: [u8; 6] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;

/// Prepend the fixed 14-byte Ethernet header onto an IP/L4 slab.
pub fn wrap(ip_l4: &[u8], ip_version: IpVersion) -> Vec<u8> {
    let ethertype = match ip_version {
        IpVersion::V4 => ETHERTYPE_IPV4,
        IpVersion::V6 => ETHERTYPE_IPV6,
    };

    let mut framed = Vec::with_capacity(ETHERNET_HEADER_LEN + ip_l4.len());
    framed.extend_from_slice(&DST_MAC);
    framed.extend_from_slice(&SRC_MAC);
    framed.extend_from_slice(&ethertype.to_be_bytes());
    framed.extend_from_slice(ip_l4);
    framed
}
