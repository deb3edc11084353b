/// Deterministic monster battle.
///
/// Each player fields their `size` strongest monsters by attack. Rounds pair
/// the teams slot by slot in rotation; the faster monster strikes first
/// (player 1 on ties). The first monster to fall loses the battle for its
/// player.

use log::debug;

use super::stat;
use crate::error::{DexError, Result};
use crate::types::{RecordList, ResultMap};

/// Rounds after which the weaker of the current pair is declared fallen
const MAX_ROUNDS: usize = 10_000;

#[derive(Debug, Clone)]
struct Fighter {
    name: String,
    hp: i64,
    atk: i64,
    def: i64,
    spd: i64,
}

impl Fighter {
    /// Hit `target`; true if the target falls
    fn strike(&self, target: &mut Fighter) -> bool {
        let damage = self.atk.saturating_sub(target.def / 2).max(1);
        target.hp = target.hp.saturating_sub(damage);
        target.hp <= 0
    }
}

pub fn battle(player1: &RecordList, player2: &RecordList, size: usize) -> Result<ResultMap> {
    let mut team1 = pick_team(player1, size, 1)?;
    let mut team2 = pick_team(player2, size, 2)?;

    let mut rounds = 0;
    let (winner, loser) = loop {
        let slot = rounds % size;
        rounds += 1;
        let (a, b) = (&mut team1[slot], &mut team2[slot]);

        if rounds > MAX_ROUNDS {
            debug!("Battle hit the round limit, weaker of {} / {} falls", a.name, b.name);
            break if a.hp < b.hp { (2, a.name.clone()) } else { (1, b.name.clone()) };
        }

        if a.spd >= b.spd {
            if a.strike(b) {
                break (1, b.name.clone());
            }
            if b.strike(a) {
                break (2, a.name.clone());
            }
        } else {
            if b.strike(a) {
                break (2, a.name.clone());
            }
            if a.strike(b) {
                break (1, b.name.clone());
            }
        }
    };

    debug!("Battle over after {} rounds: player {} wins, {} fell first", rounds, winner, loser);

    let mut map = ResultMap::new();
    map.insert("winner", winner);
    map.insert("rounds", rounds.min(MAX_ROUNDS));
    map.insert("loser_monster", loser);
    Ok(map)
}

/// The `size` strongest monsters by attack, strongest first
fn pick_team(records: &RecordList, size: usize, player: u8) -> Result<Vec<Fighter>> {
    if size == 0 {
        return Err(DexError::InsufficientRoster { reason: "a battle needs at least one monster per player".into() });
    }
    if records.len() < size {
        return Err(DexError::InsufficientRoster {
            reason: format!("player {} has {} monsters but the battle needs {}", player, records.len(), size),
        });
    }

    let mut fighters = records
        .iter()
        .map(|r| -> Result<Fighter> {
            Ok(Fighter {
                name: r.text("name"),
                hp: stat(r, "hp")?,
                atk: stat(r, "atk")?,
                def: stat(r, "def")?,
                spd: stat(r, "spd")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // stable: equal attack keeps roster order
    fighters.sort_by(|x, y| y.atk.cmp(&x.atk));
    fighters.truncate(size);
    Ok(fighters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{Decoded, normalize};
    use std::path::Path;

    fn roster(rows: &[[&str; 5]]) -> RecordList {
        let decoded = Decoded::Tabular {
            header: ["name", "hp", "atk", "def", "spd"].iter().map(|s| s.to_string()).collect(),
            rows: rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect(),
        };
        normalize(decoded, Path::new("b.csv")).unwrap()
    }

    #[test]
    fn test_faster_glass_cannon_falls_to_tank() {
        // Pika hits Onix for 10 - 0 = 10 per round, Onix hits back for 30.
        let p1 = roster(&[["Pika", "35", "10", "0", "90"]]);
        let p2 = roster(&[["Onix", "100", "30", "0", "20"]]);
        let map = battle(&p1, &p2, 1).unwrap();
        assert_eq!(map.get("winner"), Some("2"));
        assert_eq!(map.get("rounds"), Some("2"));
        assert_eq!(map.get("loser_monster"), Some("Pika"));
    }

    #[test]
    fn test_teams_rotate_strongest_first() {
        let p1 = roster(&[["Weak", "1", "1", "0", "1"], ["Ace", "100", "50", "0", "99"]]);
        let p2 = roster(&[["Foe", "60", "5", "0", "10"], ["Tiny", "1", "1", "0", "1"]]);
        // size 1: Ace (strongest) meets Foe and wins in round 2
        let map = battle(&p1, &p2, 1).unwrap();
        assert_eq!(map.get("winner"), Some("1"));
        assert_eq!(map.get("loser_monster"), Some("Foe"));
        assert_eq!(map.get("rounds"), Some("2"));
    }

    #[test]
    fn test_battle_is_deterministic() {
        let p1 = roster(&[["A", "50", "20", "10", "5"], ["B", "40", "25", "5", "7"]]);
        let p2 = roster(&[["C", "45", "22", "8", "6"], ["D", "55", "18", "12", "4"]]);
        assert_eq!(battle(&p1, &p2, 2).unwrap(), battle(&p1, &p2, 2).unwrap());
    }

    #[test]
    fn test_extreme_stats_do_not_overflow() {
        let p1 = roster(&[["Glass", "10", "-9223372036854775808", "0", "1"]]);
        let p2 = roster(&[["Tank", "5", "1", "0", "0"]]);
        // every hit floors at 1 damage; Tank drops first in round 5
        let map = battle(&p1, &p2, 1).unwrap();
        assert_eq!(map.get("winner"), Some("1"));
        assert_eq!(map.get("rounds"), Some("5"));
        assert_eq!(map.get("loser_monster"), Some("Tank"));

        let p1 = roster(&[["Max", "1", "9223372036854775807", "0", "9"]]);
        let p2 = roster(&[["Wall", "9223372036854775807", "1", "-9223372036854775808", "0"]]);
        let map = battle(&p1, &p2, 1).unwrap();
        assert_eq!(map.get("loser_monster"), Some("Wall"));
        assert_eq!(map.get("rounds"), Some("1"));
    }

    #[test]
    fn test_team_larger_than_roster_is_rejected() {
        let p1 = roster(&[["A", "1", "1", "1", "1"]]);
        let err = battle(&p1, &p1, 3).unwrap_err();
        assert!(matches!(err, DexError::InsufficientRoster { .. }), "got {:?}", err);
        assert!(matches!(battle(&p1, &p1, 0), Err(DexError::InsufficientRoster { .. })));
    }
}
