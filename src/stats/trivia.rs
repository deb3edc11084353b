/// Single-roster trivia.

use super::{stat, strongest_among, strongest_by, weakest_by};
use crate::error::Result;
use crate::types::{Record, RecordList, ResultMap, Species};

/// (result key prefix, stat field) for the four headline stats
pub(crate) const HEADLINE_STATS: &[(&str, &str)] = &[("hp", "hp"), ("atk", "atk"), ("def", "def"), ("spd", "spd")];

/// (result key prefix, stage as written in rosters)
pub(crate) const DIGIMON_STAGES: &[(&str, &str)] = &[
    ("baby", "Baby"),
    ("rookie", "Rookie"),
    ("champion", "Champion"),
    ("ultimate", "Ultimate"),
    ("mega", "Mega"),
    ("ultra", "Ultra"),
];

/// (result key prefix, type as written in rosters)
pub(crate) const DIGIMON_TYPES: &[(&str, &str)] =
    &[("data", "Data"), ("vaccine", "Vaccine"), ("virus", "Virus"), ("free", "Free")];

/// Aggregate one roster. The species decides which report it feeds.
pub fn trivia(records: &RecordList) -> Result<(Species, ResultMap)> {
    let species = Species::detect(records);
    let mut map = ResultMap::new();

    map.insert("total_trivia", records.len());
    for (key, field) in HEADLINE_STATS {
        let winner = strongest_by(records, field)?;
        map.insert(format!("{}_trivia_name", key), winner.text("name"));
        map.insert(format!("{}_trivia_points", key), stat(winner, field)?);
    }

    if species == Species::Digimon {
        digimon_trivia(records, &mut map)?;
    }

    Ok((species, map))
}

fn digimon_trivia(records: &RecordList, map: &mut ResultMap) -> Result<()> {
    let stages = distinct_values(records, "stage");
    map.insert("stages_sum", stages.len());
    map.insert("digimon_stages", stages.join(" "));
    group_counts(records, "stage", DIGIMON_STAGES, map)?;

    let types = distinct_values(records, "type");
    map.insert("types_sum", types.len());
    map.insert("digimon_types", types.join(" "));
    group_counts(records, "type", DIGIMON_TYPES, map)?;

    for (prefix, record) in [("lowest", weakest_by(records, "atk")?), ("highest", strongest_by(records, "atk")?)] {
        map.insert(format!("{}_atk_name", prefix), record.text("name"));
        map.insert(format!("{}_atk_stage", prefix), record.text("stage"));
        map.insert(format!("{}_atk_type", prefix), record.text("type"));
    }
    Ok(())
}

/// Population and strongest-by-attack per group. Empty groups report `-` / `0`.
fn group_counts(records: &RecordList, field: &str, groups: &[(&str, &str)], map: &mut ResultMap) -> Result<()> {
    for (key, label) in groups {
        let members: Vec<&Record> =
            records.iter().filter(|r| r.text(field).eq_ignore_ascii_case(label)).collect();
        map.insert(format!("total_{}", key), members.len());

        let (name, attack) = match strongest_among(members.iter().copied(), "atk")? {
            Some(record) => (record.text("name"), stat(record, "atk")?),
            None => ("-".to_string(), 0),
        };
        map.insert(format!("{}_strongest", key), name);
        map.insert(format!("{}_attack", key), attack);
    }
    Ok(())
}

/// Distinct non-empty values of `field`, in order of first appearance
fn distinct_values(records: &RecordList, field: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let value = record.text(field);
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
