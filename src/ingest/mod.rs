/// Roster ingestion - format detection, decoding and normalization.
///
/// Every supported format funnels through the same three steps:
///
/// ```text
///   path ──► SourceFormat::detect ──► decoder ──► Decoded ──► normalize ──► RecordList
/// ```
///
/// # Module Organization
///
/// - `tabular` - comma-separated text with a header row
/// - `markup` - XML with one wrapping root and one element per creature
/// - `document` - JSON, typed values kept as-is
/// - `keyvalue` - YAML, loaded without executing tags
/// - `normalize` - collapses all decoder shapes into one canonical record type
///
/// Downstream code never sees which format a list came from.

mod document;
mod keyvalue;
mod markup;
pub mod normalize;
mod tabular;

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{DexError, Result};
use crate::types::RecordList;

pub use normalize::{canonical_field_name, normalize, renormalize};

/// Raw decoder output before normalization.
///
/// Each variant keeps the native shape of its format; only the normalizer
/// knows how to reconcile them.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Header row plus string-only data rows
    Tabular { header: Vec<String>, rows: Vec<Vec<String>> },
    /// Entries under the wrapping root, each a list of (tag, text) fields
    Markup { root: String, entries: Vec<Vec<(String, String)>> },
    /// Self-describing typed tree (JSON, or YAML loaded into the same model)
    Document(serde_json::Value),
}

/// Supported roster serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Document,
    Tabular,
    Markup,
    KeyValue,
}

/// Extension tokens in match precedence order
const EXTENSION_PRECEDENCE: &[(&str, SourceFormat)] = &[
    (".json", SourceFormat::Document),
    (".csv", SourceFormat::Tabular),
    (".xml", SourceFormat::Markup),
    (".yaml", SourceFormat::KeyValue),
    (".yml", SourceFormat::KeyValue),
];

impl SourceFormat {
    /// Pick a decoder from the path alone. No content sniffing.
    pub fn detect(path: &Path) -> Result<Self> {
        let haystack = path.to_string_lossy().to_ascii_lowercase();
        EXTENSION_PRECEDENCE
            .iter()
            .find(|(token, _)| haystack.contains(token))
            .map(|(_, format)| *format)
            .ok_or_else(|| DexError::UnsupportedFormat { path: path.to_path_buf() })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Document => "json",
            SourceFormat::Tabular => "csv",
            SourceFormat::Markup => "xml",
            SourceFormat::KeyValue => "yaml",
        }
    }

    fn decode_text(&self, text: &str, path: &Path) -> Result<Decoded> {
        match self {
            SourceFormat::Document => document::decode(text, path),
            SourceFormat::Tabular => tabular::decode(text, path),
            SourceFormat::Markup => markup::decode(text, path),
            SourceFormat::KeyValue => keyvalue::decode(text, path),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read a roster file and return its normalized records.
///
/// Empty (or whitespace-only) files yield an empty list in every format.
pub fn decode(path: &Path) -> Result<RecordList> {
    let format = SourceFormat::detect(path)?;
    debug!("Detected {} format for {}", format, path.display());

    let bytes = fs::read(path).map_err(|e| DexError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| DexError::malformed(path, "file is not valid UTF-8"))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    if text.trim().is_empty() {
        debug!("{} is empty, no records", path.display());
        return Ok(RecordList::default());
    }

    let decoded = format.decode_text(text, path)?;
    let records = normalize(decoded, path)?;

    debug!("Decoded {} records from {} with fields {:?}", records.len(), path.display(), records.field_names());
    Ok(records)
}
