//! Load a JSON template file into `Vec<PacketTemplate>`.

use std::fs;
use std::path::Path;

use agni_common::{AgniError, AgniResult};

use crate::model::PacketTemplate;

/// Load and parse a template file. The JSON root must be an array of
/// template objects; anything else is an input error.
pub fn load_templates(path: &Path) -> AgniResult<Vec<PacketTemplate>> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| AgniError::Template(format!("invalid JSON in '{}': {e}", path.display())))?;

    if !value.is_array() {
        return Err(AgniError::Template(format!(
            "'{}': root JSON must be an array",
            path.display()
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| AgniError::Template(format!("'{}': template shape error: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_non_array_root() {
        let mut f = tempfile_with(r#"{"not":"an array"}"#);
        let err = load_templates(f.path()).unwrap_err();
        assert!(matches!(err, AgniError::Template(_)));
        f.flush().ok();
    }

    #[test]
    fn loads_minimal_array() {
        let f = tempfile_with(r#"[{"src_ip":"127.0.0.1","dst_ip":"127.0.0.1"}]"#);
        let templates = load_templates(f.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].transport_protocol, "udp");
    }

    fn tempfile_with(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }
}
