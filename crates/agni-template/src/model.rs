//! JSON template shape. Unknown fields are ignored (serde's default
//! behavior); missing optional fields fall back to the same defaults the
//! original reader applied: `ipv4` protocol family, `udp` transport.

use serde::Deserialize;

fn default_family() -> String {
    "ipv4".to_string()
}

fn default_transport() -> String {
    "udp".to_string()
}

fn default_packet_count() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct PacketTemplate {
    #[serde(default = "default_family")]
    pub protocol_family: String,
    #[serde(default = "default_transport")]
    pub transport_protocol: String,
    pub src_ip: String,
    pub dst_ip: String,
    #[serde(default)]
    pub src_port: u16,
    #[serde(default)]
    pub dst_port: u16,
    #[serde(default = "default_packet_count")]
    pub packet_count: u32,
    #[serde(default)]
    pub tcp_seq: u32,
    #[serde(default)]
    pub tcp_ack_seq: u32,
    #[serde(default)]
    pub tcp_flags: u8,
    #[serde(default)]
    pub icmp_type: u8,
    #[serde(default)]
    pub icmp_code: u8,
    #[serde(default)]
    pub payload: String,
}

impl PacketTemplate {
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        self.protocol_family.eq_ignore_ascii_case("ipv6")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
    Icmp,
}

impl Transport {
    #[must_use]
    pub fn from_template(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Transport::Tcp,
            "icmp" => Transport::Icmp,
            _ => Transport::Udp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unqualified_template() {
        let json = r#"{"src_ip":"127.0.0.1","dst_ip":"127.0.0.1"}"#;
        let t: PacketTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.protocol_family, "ipv4");
        assert_eq!(t.transport_protocol, "udp");
        assert_eq!(t.packet_count, 1);
        assert!(!t.is_ipv6());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"src_ip":"127.0.0.1","dst_ip":"127.0.0.1","some_future_field":42}"#;
        let t: PacketTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.src_ip, "127.0.0.1");
    }

    #[test]
    fn transport_fallback_is_udp() {
        assert_eq!(Transport::from_template("bogus"), Transport::Udp);
        assert_eq!(Transport::from_template("TCP"), Transport::Tcp);
    }
}
