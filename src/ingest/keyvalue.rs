/// YAML rosters, loaded into the same typed tree as JSON.
///
/// serde_yaml never instantiates tagged objects, so this is a safe load.

use std::path::Path;

use super::Decoded;
use crate::error::{DexError, Result};

pub fn decode(text: &str, path: &Path) -> Result<Decoded> {
    let value: serde_json::Value =
        serde_yaml::from_str(text).map_err(|e| DexError::malformed(path, format!("invalid YAML: {}", e)))?;
    Ok(Decoded::Document(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_sequence_of_mappings() {
        let yaml = "- name: Pika\n  hp: 35\n- name: Charm\n  hp: 39\n";
        let decoded = decode(yaml, Path::new("a.yaml")).unwrap();
        assert_eq!(decoded, Decoded::Document(json!([{"name": "Pika", "hp": 35}, {"name": "Charm", "hp": 39}])));
    }

    #[test]
    fn test_unclosed_flow_sequence_is_malformed() {
        let err = decode("- name: [Pika\n", Path::new("a.yaml")).unwrap_err();
        assert!(matches!(err, DexError::MalformedInput { .. }), "got {:?}", err);
    }
}
