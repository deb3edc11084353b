/// Core data structures shared by ingestion, aggregation and rendering
///
/// This module defines the canonical record shape every decoder funnels
/// into, the aggregator's result map, and the report vocabulary.
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{DexError, Result};

/// A single normalized field value
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// One creature: field name -> value, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value if the name already exists
    pub fn insert(&mut self, name: impl Into<String>, value: Scalar) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Scalar::as_int)
    }

    /// Field rendered as display text, empty when absent
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<const N: usize> From<[(&str, Scalar); N]> for Record {
    fn from(fields: [(&str, Scalar); N]) -> Self {
        let mut record = Record::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered, immutable list of normalized records from one file
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    /// Only the normalizer builds lists; everything downstream reads them.
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field names shared by every record (empty for an empty list)
    pub fn field_names(&self) -> Vec<&str> {
        self.records.first().map(|r| r.field_names().collect()).unwrap_or_default()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Creature category of a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Pokemon,
    Digimon,
}

impl Species {
    /// Digimon rosters are the ones that carry an evolution stage.
    pub fn detect(records: &RecordList) -> Self {
        if records.field_names().contains(&"stage") { Species::Digimon } else { Species::Pokemon }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::Pokemon => "Pokemon",
            Species::Digimon => "Digimon",
        }
    }
}

/// The fixed report vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Trivia(Species),
    Comparison(Species),
    Battle,
}

impl ReportKind {
    /// Tag used in report file names: `<id>_<tag>.txt`
    pub fn file_tag(&self) -> &'static str {
        match self {
            ReportKind::Trivia(Species::Pokemon) => "pokemon-trivia",
            ReportKind::Trivia(Species::Digimon) => "digimon-trivia",
            ReportKind::Comparison(_) => "info",
            ReportKind::Battle => "battle",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_tag())
    }
}

/// Aggregator output: flat string -> string map consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct ResultMap {
    entries: BTreeMap<String, String>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a key the given report kind cannot render without
    pub fn require(&self, kind: ReportKind, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| DexError::MissingReportField { kind: kind.file_tag(), key: key.to_string() })
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ResultMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ResultMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = Record::from([("name", Scalar::Text("Pika".into())), ("hp", Scalar::Int(35))]);
        record.insert("name", Scalar::Text("Raichu".into()));
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["name", "hp"]);
        assert_eq!(record.text("name"), "Raichu");
        assert_eq!(record.int("hp"), Some(35));
        assert_eq!(record.int("name"), None);
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let record = Record::from([("name", Scalar::Text("Pika".into())), ("hp", Scalar::Int(35))]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Pika","hp":35}"#);
    }

    #[test]
    fn test_species_detect() {
        let digimon = RecordList::from_records(vec![Record::from([("stage", Scalar::Text("Rookie".into()))])]);
        assert_eq!(Species::detect(&digimon), Species::Digimon);
        assert_eq!(Species::detect(&RecordList::default()), Species::Pokemon);
    }

    #[test]
    fn test_file_tags() {
        assert_eq!(ReportKind::Trivia(Species::Pokemon).file_tag(), "pokemon-trivia");
        assert_eq!(ReportKind::Trivia(Species::Digimon).file_tag(), "digimon-trivia");
        assert_eq!(ReportKind::Comparison(Species::Digimon).file_tag(), "info");
        assert_eq!(ReportKind::Battle.to_string(), "battle");
    }

    #[test]
    fn test_require_missing_key() {
        let map: ResultMap = [("winner", "1")].into_iter().collect();
        assert_eq!(map.require(ReportKind::Battle, "winner").unwrap(), "1");
        match map.require(ReportKind::Battle, "rounds") {
            Err(DexError::MissingReportField { kind, key }) => {
                assert_eq!(kind, "battle");
                assert_eq!(key, "rounds");
            }
            other => panic!("expected MissingReportField, got {:?}", other),
        }
    }
}
