/// Comma-separated rosters. The first row names the fields.

use std::path::Path;

use super::Decoded;
use crate::error::{DexError, Result};

pub fn decode(text: &str, path: &Path) -> Result<Decoded> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b',').has_headers(true).from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| DexError::malformed(path, format!("unreadable header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row = row.map_err(|e| DexError::malformed(path, format!("row {}: {}", i + 2, e)))?;
        rows.push(row.iter().map(str::to_string).collect());
    }

    Ok(Decoded::Tabular { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows_are_strings() {
        let decoded = decode("name,hp\nPika,35\nCharm,39\n", Path::new("a.csv")).unwrap();
        assert_eq!(
            decoded,
            Decoded::Tabular {
                header: vec!["name".into(), "hp".into()],
                rows: vec![vec!["Pika".into(), "35".into()], vec!["Charm".into(), "39".into()]],
            }
        );
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        let decoded = decode("name,type\n\"Mr. Mime\",\"Psychic, Fairy\"\n", Path::new("a.csv")).unwrap();
        match decoded {
            Decoded::Tabular { rows, .. } => assert_eq!(rows[0][1], "Psychic, Fairy"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = decode("name,hp\nPika\n", Path::new("a.csv")).unwrap_err();
        assert!(matches!(err, DexError::MalformedInput { .. }), "got {:?}", err);
    }
}
