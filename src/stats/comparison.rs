/// Two-player roster comparison.

use std::collections::BTreeSet;

use log::warn;

use super::strongest_by;
use crate::error::Result;
use crate::types::{Record, RecordList, ResultMap, Species};

/// Compare two rosters. Player 1's roster decides the species labels.
pub fn compare(player1: &RecordList, player2: &RecordList) -> Result<(Species, ResultMap)> {
    let species = Species::detect(player1);
    if Species::detect(player2) != species {
        warn!("Player rosters hold different species; labelling the comparison as {}", species.label());
    }

    let mut map = ResultMap::new();
    for (player, records) in [(1, player1), (2, player2)] {
        map.insert(format!("player{}_total_monster_info", player), records.len());
        map.insert(format!("strongest_monster_player{}_info", player), strongest_by(records, "atk")?.text("name"));
        map.insert(format!("stg_or_legend_player{}_info", player), records.iter().filter(|r| is_rare(r, species)).count());
    }

    let names1 = name_set(player1);
    let names2 = name_set(player2);
    map.insert("repeated_monster_info", names1.intersection(&names2).count());
    map.insert("different_monster_info", names1.symmetric_difference(&names2).count());

    Ok((species, map))
}

/// Legendary pokemon, or digimon at the Ultra stage
fn is_rare(record: &Record, species: Species) -> bool {
    match species {
        Species::Pokemon => record.text("legendary") == "True",
        Species::Digimon => record.text("stage").eq_ignore_ascii_case("ultra"),
    }
}

fn name_set(records: &RecordList) -> BTreeSet<String> {
    records.iter().map(|r| r.text("name")).filter(|n| !n.is_empty()).collect()
}
