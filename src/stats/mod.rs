/// Roster aggregation - turns normalized records into report result maps.
///
/// Each aggregator returns a flat `ResultMap` carrying exactly the keys the
/// matching report layout needs.
///
/// # Module Organization
///
/// - `trivia` - single-roster facts (both species)
/// - `comparison` - two-player side-by-side counts
/// - `battle` - deterministic battle between two teams

mod battle;
mod comparison;
mod trivia;

pub use battle::battle;
pub use comparison::compare;
pub use trivia::trivia;
pub(crate) use trivia::{DIGIMON_STAGES, DIGIMON_TYPES, HEADLINE_STATS};

use crate::error::{DexError, Result};
use crate::types::{Record, RecordList};

/// Integer stat of a creature; absent or non-numeric stats are rejected
pub fn stat(record: &Record, field: &str) -> Result<i64> {
    record.int(field).ok_or_else(|| DexError::InvalidStat {
        creature: record.text("name"),
        field: field.to_string(),
        found: record.text(field),
    })
}

/// First creature with the highest `field`
pub fn strongest_by<'a>(records: &'a RecordList, field: &str) -> Result<&'a Record> {
    strongest_among(records, field)?.ok_or_else(|| empty_roster(field))
}

/// First creature with the lowest `field`
pub fn weakest_by<'a>(records: &'a RecordList, field: &str) -> Result<&'a Record> {
    extreme_by(records, field, |candidate, current| candidate < current)?.ok_or_else(|| empty_roster(field))
}

/// Like `strongest_by`, over any subset; `None` when the subset is empty
pub fn strongest_among<'a, I>(records: I, field: &str) -> Result<Option<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    extreme_by(records, field, |candidate, current| candidate > current)
}

fn extreme_by<'a, I>(records: I, field: &str, replaces: fn(i64, i64) -> bool) -> Result<Option<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut best: Option<(&Record, i64)> = None;
    for record in records {
        let value = stat(record, field)?;
        match best {
            Some((_, current)) if !replaces(value, current) => {}
            _ => best = Some((record, value)),
        }
    }
    Ok(best.map(|(record, _)| record))
}

fn empty_roster(field: &str) -> DexError {
    DexError::InsufficientRoster { reason: format!("cannot rank an empty roster by '{}'", field) }
}
