/// Two-player comparison table.
///
/// At classic widths the table is `|18|29|29|` with the shared rows spanning
/// both player columns. Columns grow to fit the longest label or value.

use super::layout::{Block, display_width, pad_right};
use crate::error::Result;
use crate::types::{ReportKind, ResultMap, Species};

const LABEL_WIDTH: usize = 18;
const PLAYER_WIDTH: usize = 29;

pub fn required_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for player in [1, 2] {
        keys.push(format!("player{}_total_monster_info", player));
        keys.push(format!("strongest_monster_player{}_info", player));
        keys.push(format!("stg_or_legend_player{}_info", player));
    }
    keys.push("repeated_monster_info".to_string());
    keys.push("different_monster_info".to_string());
    keys
}

/// Row labels that change with the species
struct Labels {
    title: &'static str,
    total: &'static str,
    strongest: &'static str,
    rare: &'static str,
    repeated: &'static str,
    different: &'static str,
}

impl Labels {
    fn for_species(species: Species) -> Self {
        match species {
            Species::Pokemon => Labels {
                title: " POKEMON INFO ",
                total: "Pokemons",
                strongest: "Strongest Pokémon",
                rare: "Legendary",
                repeated: "Repeated Pokemons",
                different: "Different Pokemons",
            },
            Species::Digimon => Labels {
                title: " DIGIMON INFO ",
                total: "Digimons",
                strongest: "Strongest Digimon",
                rare: "Digimon Ultra",
                repeated: "Repeated Digimons",
                different: "Different Digimons",
            },
        }
    }
}

/// Table cell: one leading space, then the value padded to `width`
fn cell(value: &str, width: usize) -> String {
    pad_right(&format!(" {}", value), width)
}

pub fn layout(map: &ResultMap, species: Species, header: &str) -> Result<Block> {
    let kind = ReportKind::Comparison(species);
    let labels = Labels::for_species(species);

    let mut player_rows = Vec::new();
    for (label, key) in [
        (labels.total, "player{}_total_monster_info"),
        (labels.strongest, "strongest_monster_player{}_info"),
        (labels.rare, "stg_or_legend_player{}_info"),
    ] {
        let p1 = map.require(kind, &key.replace("{}", "1"))?;
        let p2 = map.require(kind, &key.replace("{}", "2"))?;
        player_rows.push((label, p1, p2));
    }
    let shared_rows = [
        (labels.repeated, map.require(kind, "repeated_monster_info")?),
        (labels.different, map.require(kind, "different_monster_info")?),
    ];

    let all_labels = player_rows.iter().map(|r| r.0).chain(shared_rows.iter().map(|r| r.0));
    let label_width = all_labels.map(display_width).max().unwrap_or(0).max(LABEL_WIDTH);

    // a cell is " value" padded; shared cells span two columns plus a border
    let longest_player = player_rows.iter().flat_map(|r| [r.1, r.2]).map(display_width).max().unwrap_or(0);
    let longest_shared = shared_rows.iter().map(|r| display_width(r.1)).max().unwrap_or(0);
    let player_width = PLAYER_WIDTH.max(longest_player + 1).max(longest_shared.div_ceil(2));
    let shared_width = 2 * player_width + 1;

    let mut block = Block::new();
    block
        .blank()
        .text(header)
        .blank()
        .framed(' ', '=', ' ', labels.title)
        .text(format!(
            "|{}|{}|{}|",
            " ".repeat(label_width),
            cell("PLAYER 1", player_width),
            cell("PLAYER 2", player_width)
        ))
        .text(format!("|{}|{}|{}|", "-".repeat(label_width), "-".repeat(player_width), "-".repeat(player_width)));

    for (label, p1, p2) in &player_rows {
        block.text(format!(
            "|{}|{}|{}|",
            pad_right(label, label_width),
            cell(p1, player_width),
            cell(p2, player_width)
        ));
    }
    for (label, value) in &shared_rows {
        block.text(format!("|{}|{}|", pad_right(label, label_width), cell(value, shared_width)));
    }

    block
        .text(format!("|{}|{}|", "-".repeat(label_width), "-".repeat(shared_width)))
        .framed(' ', '=', ' ', "")
        .blank();
    Ok(block)
}
