/// Report rendering - result maps to fixed-layout text.
///
/// This module handles:
/// - The required-key contract between aggregators and layouts
/// - The timestamp header shared by every report
/// - Dispatching to the per-kind layouts
///
/// # Module Organization
///
/// - `layout` - frame-width text blocks (padding, centering, rules)
/// - `trivia` - single-roster trivia for both species
/// - `comparison` - two-player table
/// - `battle` - battle result box
///
/// Output is byte-for-byte deterministic for a given map and timestamp.

mod battle;
mod comparison;
pub mod layout;
mod trivia;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::types::{ReportKind, ResultMap};

/// Timestamp format for the report header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Render a result map as the report text for `kind`.
///
/// All required keys are checked before any text is composed; a missing key
/// fails with `MissingReportField` and produces nothing.
pub fn render(map: &ResultMap, kind: ReportKind, generated_at: NaiveDateTime) -> Result<String> {
    for key in required_keys(kind) {
        map.require(kind, &key)?;
    }

    let header = format!("reported generated on: {}", generated_at.format(TIMESTAMP_FORMAT));
    let block = match kind {
        ReportKind::Trivia(species) => trivia::layout(map, species, &header)?,
        ReportKind::Comparison(species) => comparison::layout(map, species, &header)?,
        ReportKind::Battle => battle::layout(map, &header)?,
    };
    Ok(block.render())
}

/// Every key `kind` needs from its aggregator
pub fn required_keys(kind: ReportKind) -> Vec<String> {
    match kind {
        ReportKind::Trivia(species) => trivia::required_keys(species),
        ReportKind::Comparison(_) => comparison::required_keys(),
        ReportKind::Battle => battle::REQUIRED_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}
