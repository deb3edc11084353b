use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// What to do when a report file already exists
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnExists {
    /// Ask on the terminal
    #[default]
    Ask,
    /// Append without asking
    Append,
    /// Overwrite without asking
    Overwrite,
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "monster-dex")]
#[command(about = "Trivia, comparison and battle reports for Pokemon and Digimon rosters")]
#[command(version)]
pub struct CliArgs {
    /// Roster file for a trivia report (.json, .csv, .xml, .yaml, .yml)
    #[arg(long, value_name = "FILE")]
    pub trivia: Option<PathBuf>,

    /// First player's roster (used with --info or --battle)
    #[arg(long, value_name = "FILE")]
    pub player1: Option<PathBuf>,

    /// Second player's roster (used with --info or --battle)
    #[arg(long, value_name = "FILE")]
    pub player2: Option<PathBuf>,

    /// Compare the two players' rosters side by side
    #[arg(long)]
    pub info: bool,

    /// Battle the two players' strongest monsters
    #[arg(long)]
    pub battle: bool,

    /// Monsters per team in a battle (default: 3)
    #[arg(long, value_name = "N")]
    pub battle_size: Option<usize>,

    /// Report identifier, used in the file name <ID>_<kind>.txt (default: 0)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Directory reports are saved to (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How to handle an existing report file (default: ask)
    #[arg(long, value_enum, value_name = "MODE")]
    pub on_exists: Option<OnExists>,

    /// TOML config file (default: $DEX_CONFIG if set)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the normalized records of FILE as JSON and exit
    #[arg(long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    /// Print the report without saving it
    #[arg(long)]
    pub no_save: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        let selected = [self.trivia.is_some(), self.info, self.battle, self.dump.is_some()]
            .iter()
            .filter(|s| **s)
            .count();

        if selected == 0 {
            return Err("Must specify one of: --trivia, --info, --battle, or --dump".to_string());
        }
        if selected > 1 {
            return Err("Only one of --trivia, --info, --battle, or --dump can be used at a time".to_string());
        }

        let has_players = self.player1.is_some() || self.player2.is_some();
        if self.info || self.battle {
            if self.player1.is_none() || self.player2.is_none() {
                let flag = if self.info { "--info" } else { "--battle" };
                return Err(format!("{} needs both --player1 and --player2", flag));
            }
        } else if has_players {
            return Err("--player1/--player2 are only used with --info or --battle".to_string());
        }

        if self.battle_size.is_some() && !self.battle {
            return Err("--battle-size is only used with --battle".to_string());
        }
        if self.battle_size == Some(0) {
            return Err("--battle-size must be at least 1".to_string());
        }

        Ok(())
    }
}
