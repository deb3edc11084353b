/// Battle result box.

use super::layout::Block;
use crate::error::Result;
use crate::types::{ReportKind, ResultMap};

pub const REQUIRED_KEYS: &[&str] = &["winner", "rounds", "loser_monster"];

/// Width of the dashed divider between result sections
const DIVIDER_WIDTH: usize = 28;

pub fn layout(map: &ResultMap, header: &str) -> Result<Block> {
    let kind = ReportKind::Battle;
    let winner = map.require(kind, "winner")?;
    let rounds = map.require(kind, "rounds")?;
    let loser = map.require(kind, "loser_monster")?;
    let divider = "-".repeat(DIVIDER_WIDTH);

    let mut block = Block::new();
    block
        .blank()
        .text(header)
        .blank()
        .title('=', "MONSTER BATTLE")
        .blank()
        .framed(' ', '=', ' ', "")
        .framed('|', ' ', '|', "+++++ RESULT +++++")
        .framed(' ', '=', ' ', "")
        .framed('|', ' ', '|', divider.as_str())
        .framed('|', ' ', '|', "--Winner--")
        .framed('|', ' ', '|', format!("Player {}", winner))
        .framed('|', ' ', '|', divider.as_str())
        .framed('|', ' ', '|', "--Rounds--")
        .framed('|', ' ', '|', rounds)
        .framed('|', ' ', '|', divider.as_str())
        .framed('|', ' ', '|', "--First monster to fall--")
        .framed('|', ' ', '|', loser)
        .framed(' ', '=', ' ', "")
        .blanks(3);
    Ok(block)
}
