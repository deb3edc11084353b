/// JSON rosters. The document's own types are trusted; reconciling them with
/// the string-only formats is the normalizer's job.

use std::path::Path;

use super::Decoded;
use crate::error::{DexError, Result};

pub fn decode(text: &str, path: &Path) -> Result<Decoded> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DexError::malformed(path, format!("invalid JSON: {}", e)))?;
    Ok(Decoded::Document(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_native_types() {
        let decoded = decode(r#"[{"name": "Pika", "hp": 35}]"#, Path::new("a.json")).unwrap();
        assert_eq!(decoded, Decoded::Document(json!([{"name": "Pika", "hp": 35}])));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        assert!(matches!(decode("[{", Path::new("a.json")), Err(DexError::MalformedInput { .. })));
    }
}
