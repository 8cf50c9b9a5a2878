//! Identifier-tagged payload protocol: `ASCII(id) || '|' || user_bytes`.
//!
//! The id allocated for a candidate packet is simply the list's current
//! `next_index()` — if the builder later fails, the id is never consumed
//! because the list was never pushed to, so no counter needs separate
//! bookkeeping to keep id and list position in lockstep.

/// Build the on-wire tagged payload for `id` prefixed onto `payload`.
#[must_use]
pub fn build(id: usize, payload: &[u8]) -> Vec<u8> {
    let mut tagged = format!("{id}|").into_bytes();
    tagged.extend_from_slice(payload);
    tagged
}

/// Parse the leading `ASCII(id) || '|'` off of `buf`, returning `(id, rest)`.
/// Returns `None` if no `|` is found or the prefix is not a valid decimal id.
#[must_use]
pub fn parse(buf: &[u8]) -> Option<(usize, &[u8])> {
    let sep = buf.iter().position(|&b| b == b'|')?;
    let id_str = std::str::from_utf8(&buf[..sep]).ok()?;
    let id: usize = id_str.parse().ok()?;
    Some((id, &buf[sep + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_parse_round_trip() {
        let tagged = build(42, b"hello");
        assert_eq!(tagged, b"42|hello");
        let (id, rest) = parse(&tagged).unwrap();
        assert_eq!(id, 42);
        assert_eq!(rest, b"hello");
    }

    #[test]
    fn build_with_empty_payload() {
        assert_eq!(build(1, b""), b"1|");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(parse(b"no separator here").is_none());
    }

    #[test]
    fn parse_rejects_non_decimal_prefix() {
        assert!(parse(b"abc|rest").is_none());
    }
}
