//! Template expansion: walk templates in array order, emit `packet_count`
//! copies of each sequentially, tag each payload with the id it will occupy
//! in the packet list, and push the built frame.

use agni_common::IpVersion;
use agni_packet::{build_icmp, build_tcp, build_udp, tagged_payload, PacketList};

use crate::model::{PacketTemplate, Transport};

/// Expand `templates` into `list`, in order. Construction failures (bad
/// address, mismatched address family) are logged and skipped; the id
/// candidate for that slot is never consumed since the list was never
/// pushed to, so later packets still get contiguous ids.
pub fn expand_into(templates: &[PacketTemplate], list: &mut PacketList) {
    for template in templates {
        let transport = Transport::from_template(&template.transport_protocol);
        let ip_version = if template.is_ipv6() { IpVersion::V6 } else { IpVersion::V4 };
        for _ in 0..template.packet_count {
            let id = list.next_index();
            let tagged = tagged_payload::build(id, template.payload.as_bytes());

            let built = match transport {
                Transport::Tcp => build_tcp(
                    ip_version,
                    &template.src_ip,
                    &template.dst_ip,
                    template.src_port,
                    template.dst_port,
                    template.tcp_seq,
                    template.tcp_ack_seq,
                    template.tcp_flags,
                    &tagged,
                ),
                Transport::Udp => build_udp(
                    ip_version,
                    &template.src_ip,
                    &template.dst_ip,
                    template.src_port,
                    template.dst_port,
                    &tagged,
                ),
                Transport::Icmp => build_icmp(
                    ip_version,
                    &template.src_ip,
                    &template.dst_ip,
                    template.icmp_type,
                    template.icmp_code,
                    0,
                    0,
                    &tagged,
                ),
            };

            match built {
                Ok(record) => {
                    list.push(record.bytes, record.ip_version, record.protocol);
                }
                Err(e) => {
                    tracing::warn!(
                        src_ip = %template.src_ip,
                        dst_ip = %template.dst_ip,
                        error = %e,
                        "skipping packet: construction error"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_packet_count_copies_with_sequential_ids() {
        let json = r#"[{"protocol_family":"ipv4","transport_protocol":"udp",
            "src_ip":"127.0.0.1","dst_ip":"127.0.0.1",
            "src_port":1234,"dst_port":5678,"payload":"hi","packet_count":3}]"#;
        let templates: Vec<PacketTemplate> = serde_json::from_str(json).unwrap();

        let mut list = PacketList::new();
        expand_into(&templates, &mut list);

        assert_eq!(list.len(), 3);
        for k in 1..=3usize {
            let rec = list.get(k).unwrap();
            let l4 = &rec.bytes[14 + 20 + 8..];
            let (id, rest) = agni_packet::tagged_payload::parse(l4).unwrap();
            assert_eq!(id, k);
            assert_eq!(rest, b"hi");
        }
    }

    #[test]
    fn construction_error_does_not_consume_an_id() {
        let json = r#"[
            {"src_ip":"not-an-ip","dst_ip":"127.0.0.1","payload":"a"},
            {"src_ip":"127.0.0.1","dst_ip":"127.0.0.1","payload":"b"}
        ]"#;
        let templates: Vec<PacketTemplate> = serde_json::from_str(json).unwrap();

        let mut list = PacketList::new();
        expand_into(&templates, &mut list);

        assert_eq!(list.len(), 1);
        let l4 = &list.get(1).unwrap().bytes[14 + 20 + 8..];
        let (id, rest) = agni_packet::tagged_payload::parse(l4).unwrap();
        assert_eq!(id, 1);
        assert_eq!(rest, b"b");
    }

    #[test]
    fn icmpv6_template_sets_next_header_58() {
        let json = r#"[{"protocol_family":"ipv6","transport_protocol":"icmp",
            "src_ip":"::1","dst_ip":"::1","icmp_type":128,"icmp_code":0,
            "payload":"x","packet_count":1}]"#;
        let templates: Vec<PacketTemplate> = serde_json::from_str(json).unwrap();

        let mut list = PacketList::new();
        expand_into(&templates, &mut list);

        assert_eq!(list.len(), 1);
        let rec = list.get(1).unwrap();
        assert_eq!(rec.bytes[14 + 6], 58);
    }
}
