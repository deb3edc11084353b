/// Record normalization.
///
/// Collapses every decoder shape into one canonical `RecordList`:
///
/// - field names are canonicalized (`Lv50 Atk` -> `atk`, `#` -> `number`)
/// - nested objects are flattened onto their leaf keys
/// - values follow the numeric-when-integral convention: integral numbers
///   and integer-looking text become `Scalar::Int`, everything else is
///   trimmed `Scalar::Text`
/// - every record carries the union of all field names, in order of first
///   appearance, with `Text("")` filling the gaps
///
/// Normalizing an already-normalized list returns it unchanged.

use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use super::Decoded;
use crate::error::{DexError, Result};
use crate::types::{Record, RecordList, Scalar};

/// Field name aliases applied after slugging
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("attack", "atk"),
    ("defense", "def"),
    ("speed", "spd"),
    ("digimon", "name"),
    ("pokemon", "name"),
];

/// Level-scaled stat prefixes (`Lv50 HP`, `Lv 50 Atk`)
const LEVEL_PREFIXES: &[&str] = &["lv50_", "lv_50_"];

/// Separator for arrays of scalars (`["Grass", "Poison"]` -> `Grass/Poison`)
const LIST_SEPARATOR: &str = "/";

/// A record before name canonicalization and field-set reconciliation
type RawRecord = Vec<(String, Scalar)>;

/// Normalize raw decoder output. `path` is only used in error messages.
pub fn normalize(decoded: Decoded, path: &Path) -> Result<RecordList> {
    let raw: Vec<RawRecord> = match decoded {
        Decoded::Tabular { header, rows } => rows
            .into_iter()
            .map(|row| header.iter().cloned().zip(row.iter().map(|v| normalize_text(v))).collect())
            .collect(),
        Decoded::Markup { root, entries } => {
            debug!("Unwrapping {} entries from <{}>", entries.len(), root);
            entries
                .into_iter()
                .map(|fields| fields.into_iter().map(|(name, value)| (name, normalize_text(&value))).collect())
                .collect()
        }
        Decoded::Document(value) => document_records(value, path)?,
    };
    reconcile(raw, path)
}

/// Run an existing list back through normalization.
pub fn renormalize(records: RecordList) -> Result<RecordList> {
    let raw = records
        .into_records()
        .into_iter()
        .map(|record| {
            record
                .iter()
                .map(|(name, value)| {
                    let value = match value {
                        Scalar::Int(n) => Scalar::Int(*n),
                        Scalar::Text(s) => normalize_text(s),
                    };
                    (name.to_string(), value)
                })
                .collect()
        })
        .collect();
    reconcile(raw, &PathBuf::from("<records>"))
}

/// Canonical spelling of a source field name, or `None` if nothing usable
/// remains.
pub fn canonical_field_name(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw == "#" {
        return Some("number".to_string());
    }

    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    for prefix in LEVEL_PREFIXES {
        if let Some(rest) = slug.strip_prefix(prefix)
            && !rest.is_empty()
        {
            slug = rest.to_string();
            break;
        }
    }

    if let Some((_, canonical)) = FIELD_ALIASES.iter().find(|(alias, _)| *alias == slug) {
        slug = canonical.to_string();
    }

    if slug.is_empty() { None } else { Some(slug) }
}

/// Canonical scalar for a textual value. Runs of whitespace or control
/// characters collapse to one space so values stay on a single report line.
fn normalize_text(raw: &str) -> Scalar {
    let collapsed = raw
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = collapsed.as_str();

    if let Ok(n) = text.parse::<i64>() {
        return Scalar::Int(n);
    }
    if text.eq_ignore_ascii_case("true") {
        return Scalar::Text("True".to_string());
    }
    if text.eq_ignore_ascii_case("false") {
        return Scalar::Text("False".to_string());
    }
    if let Ok(f) = text.parse::<f64>()
        && f.is_finite()
    {
        return normalize_float(f);
    }
    Scalar::Text(text.to_string())
}

fn normalize_float(f: f64) -> Scalar {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Scalar::Int(f as i64)
    } else {
        Scalar::Text(f.to_string())
    }
}

/// Canonical scalar for a leaf of a typed document
fn normalize_json_scalar(value: &Value, field: &str, path: &Path) -> Result<Scalar> {
    Ok(match value {
        Value::Null => Scalar::Text(String::new()),
        Value::Bool(true) => Scalar::Text("True".to_string()),
        Value::Bool(false) => Scalar::Text("False".to_string()),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Scalar::Int(i),
            (None, Some(f)) => normalize_float(f),
            (None, None) => Scalar::Text(n.to_string()),
        },
        Value::String(s) => normalize_text(s),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if item.is_array() || item.is_object() {
                    return Err(DexError::malformed(path, format!("field '{}' holds a nested list or object", field)));
                }
                parts.push(normalize_json_scalar(item, field, path)?.to_string());
            }
            normalize_text(&parts.join(LIST_SEPARATOR))
        }
        Value::Object(_) => {
            return Err(DexError::malformed(path, format!("field '{}' holds an object where a value was expected", field)));
        }
    })
}

fn document_records(value: Value, path: &Path) -> Result<Vec<RawRecord>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(DexError::malformed(
                path,
                format!("expected a list of creatures at the top level, found {}", json_kind(&other)),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => {
                let mut record = Vec::new();
                flatten_object(&map, &mut record, path)?;
                Ok(record)
            }
            other => Err(DexError::malformed(
                path,
                format!("entry #{} is {}, expected an object", index + 1, json_kind(&other)),
            )),
        })
        .collect()
}

/// Hoist nested objects onto their leaf keys
fn flatten_object(map: &Map<String, Value>, out: &mut RawRecord, path: &Path) -> Result<()> {
    for (key, value) in map {
        match value {
            Value::Object(inner) => flatten_object(inner, out, path)?,
            leaf => out.push((key.clone(), normalize_json_scalar(leaf, key, path)?)),
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Canonicalize names and give every record the same field set
fn reconcile(raw: Vec<RawRecord>, path: &Path) -> Result<RecordList> {
    let mut field_order: Vec<String> = Vec::new();
    let mut canonical_records = Vec::with_capacity(raw.len());

    for (index, fields) in raw.into_iter().enumerate() {
        let mut record: Vec<(String, Scalar)> = Vec::with_capacity(fields.len());
        for (source_name, value) in fields {
            let name = canonical_field_name(&source_name).ok_or_else(|| {
                DexError::malformed(path, format!("record #{}: field name '{}' is empty", index + 1, source_name))
            })?;
            if record.iter().any(|(existing, _)| *existing == name) {
                return Err(DexError::malformed(
                    path,
                    format!("record #{}: more than one field maps to '{}' (from '{}')", index + 1, name, source_name),
                ));
            }
            if !field_order.contains(&name) {
                field_order.push(name.clone());
            }
            record.push((name, value));
        }
        canonical_records.push(record);
    }

    let records = canonical_records
        .into_iter()
        .map(|mut fields| {
            let mut record = Record::new();
            for name in &field_order {
                let value = match fields.iter().position(|(n, _)| n == name) {
                    Some(pos) => fields.swap_remove(pos).1,
                    None => Scalar::Text(String::new()),
                };
                record.insert(name.clone(), value);
            }
            record
        })
        .collect();

    debug!("Normalized field set: {:?}", field_order);
    Ok(RecordList::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn test_canonical_field_names() {
        assert_eq!(canonical_field_name("Name").as_deref(), Some("name"));
        assert_eq!(canonical_field_name(" HP ").as_deref(), Some("hp"));
        assert_eq!(canonical_field_name("Sp. Atk").as_deref(), Some("sp_atk"));
        assert_eq!(canonical_field_name("Lv50 Atk").as_deref(), Some("atk"));
        assert_eq!(canonical_field_name("Lv 50 HP").as_deref(), Some("hp"));
        assert_eq!(canonical_field_name("Attack").as_deref(), Some("atk"));
        assert_eq!(canonical_field_name("Digimon").as_deref(), Some("name"));
        assert_eq!(canonical_field_name("#").as_deref(), Some("number"));
        assert_eq!(canonical_field_name("Type 1").as_deref(), Some("type_1"));
        assert_eq!(canonical_field_name("--"), None);
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for name in ["name", "atk", "sp_atk", "number", "type_1", "lv50"] {
            assert_eq!(canonical_field_name(name).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_text_values() {
        assert_eq!(normalize_text(" 35 "), Scalar::Int(35));
        assert_eq!(normalize_text("45.0"), Scalar::Int(45));
        assert_eq!(normalize_text("0.50"), text("0.5"));
        assert_eq!(normalize_text("TRUE"), text("True"));
        assert_eq!(normalize_text(" Pika "), text("Pika"));
        assert_eq!(normalize_text("inf"), text("inf"));
    }

    #[test]
    fn test_interior_line_breaks_collapse() {
        assert_eq!(normalize_text("Mr.\nMime"), text("Mr. Mime"));
        assert_eq!(normalize_text(" Ho-Oh\t\r\n  Lugia "), text("Ho-Oh Lugia"));
        assert_eq!(normalize_text("Porygon\u{7}Z"), text("Porygon Z"));

        let decoded = super::super::tabular::decode("name,hp\n\"Mr.\nMime\",40\n", Path::new("m.csv")).unwrap();
        let list = normalize(decoded, Path::new("m.csv")).unwrap();
        assert_eq!(list.records()[0].text("name"), "Mr. Mime");
        assert_eq!(renormalize(list.clone()).unwrap(), list);
    }

    #[test]
    fn test_tabular_scenario() {
        let decoded = Decoded::Tabular {
            header: vec!["name".into(), "hp".into(), "atk".into()],
            rows: vec![
                vec!["Pika".into(), "35".into(), "55".into()],
                vec!["Charm".into(), "39".into(), "52".into()],
                vec!["Bulba".into(), "45".into(), "49".into()],
            ],
        };
        let list = normalize(decoded, Path::new("a.csv")).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.field_names(), vec!["name", "hp", "atk"]);
        assert_eq!(list.records()[2].int("hp"), Some(45));
    }

    #[test]
    fn test_nested_stats_flatten_to_leaf_keys() {
        let nested = Decoded::Document(json!([{"Name": "Pika", "stats": {"HP": 35, "Attack": 55.0}}]));
        let flat = Decoded::Tabular {
            header: vec!["name".into(), "hp".into(), "atk".into()],
            rows: vec![vec!["Pika".into(), "35".into(), "55".into()]],
        };
        assert_eq!(normalize(nested, Path::new("a.json")).unwrap(), normalize(flat, Path::new("a.csv")).unwrap());
    }

    #[test]
    fn test_missing_fields_are_filled_in_first_seen_order() {
        let decoded = Decoded::Document(json!([{"name": "Pika"}, {"hp": 39, "name": "Charm"}]));
        let list = normalize(decoded, Path::new("a.json")).unwrap();
        for record in &list {
            assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["name", "hp"]);
        }
        assert_eq!(list.records()[0].get("hp"), Some(&text("")));
        assert_eq!(list.records()[1].int("hp"), Some(39));
    }

    #[test]
    fn test_typed_document_values() {
        let decoded = Decoded::Document(json!([{"legendary": true, "types": ["Grass", "Poison"], "note": null}]));
        let list = normalize(decoded, Path::new("a.json")).unwrap();
        let record = &list.records()[0];
        assert_eq!(record.get("legendary"), Some(&text("True")));
        assert_eq!(record.get("types"), Some(&text("Grass/Poison")));
        assert_eq!(record.get("note"), Some(&text("")));
    }

    #[test]
    fn test_colliding_names_are_malformed() {
        let decoded = Decoded::Tabular { header: vec!["Attack".into(), "atk".into()], rows: vec![vec!["1".into(), "2".into()]] };
        assert!(matches!(normalize(decoded, Path::new("a.csv")), Err(DexError::MalformedInput { .. })));
    }

    #[test]
    fn test_top_level_object_is_malformed() {
        let decoded = Decoded::Document(json!({"name": "Pika"}));
        assert!(matches!(normalize(decoded, Path::new("a.json")), Err(DexError::MalformedInput { .. })));
    }

    #[test]
    fn test_null_document_is_empty() {
        let list = normalize(Decoded::Document(Value::Null), Path::new("a.yaml")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_renormalize_is_a_no_op() {
        let decoded = Decoded::Document(json!([
            {"#": 25, "Name": " Pikachu ", "Lv50 HP": "35", "ratio": 0.5, "legendary": false},
            {"Name": "Mew", "legendary": true, "extra": "x"}
        ]));
        let once = normalize(decoded, Path::new("a.json")).unwrap();
        let twice = renormalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
