/// XML rosters.
///
/// Expected shape: one wrapping root, one child element per creature, and
/// one grandchild element per field. Anything flatter or deeper is rejected
/// rather than coerced.

use std::path::Path;

use super::Decoded;
use crate::error::{DexError, Result};

pub fn decode(text: &str, path: &Path) -> Result<Decoded> {
    let doc = roxmltree::Document::parse(text).map_err(|e| DexError::malformed(path, format!("invalid XML: {}", e)))?;
    let root = doc.root_element();

    let mut entries = Vec::new();
    for (index, entry) in root.children().filter(|n| n.is_element()).enumerate() {
        let entry_tag = entry.tag_name().name();
        let mut fields = Vec::new();

        for field in entry.children().filter(|n| n.is_element()) {
            let field_tag = field.tag_name().name();
            if field.children().any(|n| n.is_element()) {
                return Err(DexError::malformed(
                    path,
                    format!("field <{}> of entry #{} <{}> nests more than two levels deep", field_tag, index + 1, entry_tag),
                ));
            }
            let value: String = field.children().filter(|n| n.is_text()).filter_map(|n| n.text()).collect();
            fields.push((field_tag.to_string(), value));
        }

        if fields.is_empty() {
            return Err(DexError::malformed(
                path,
                format!("entry #{} <{}> has no field elements; expected <{}><entry><field>", index + 1, entry_tag, root.tag_name().name()),
            ));
        }
        entries.push(fields);
    }

    Ok(Decoded::Markup { root: root.tag_name().name().to_string(), entries })
}
