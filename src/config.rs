/// Configuration resolution module
///
/// This module handles:
/// - Loading the optional TOML config file (--config or $DEX_CONFIG)
/// - Merging CLI flags over config values over defaults
/// - Building the immutable RunPlan that main executes
use crate::cli::{CliArgs, OnExists};
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a default config file
pub const CONFIG_ENV: &str = "DEX_CONFIG";

/// Monsters per team when neither flag nor config says otherwise
pub const DEFAULT_BATTLE_SIZE: usize = 3;

/// Identifier used when none is given
pub const DEFAULT_ID: &str = "0";

/// Settings a config file may provide; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub battle_size: Option<usize>,
    pub on_exists: Option<OnExists>,
    pub id: Option<String>,
}

/// The report (or dump) one invocation produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Trivia { roster: PathBuf },
    Info { player1: PathBuf, player2: PathBuf },
    Battle { player1: PathBuf, player2: PathBuf, size: usize },
    Dump { roster: PathBuf },
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub mode: Mode,
    pub id: String,
    pub output_dir: PathBuf,
    pub on_exists: OnExists,
    pub save: bool,
}

/// Build a RunPlan from CLI arguments
///
/// Arguments must already have passed `CliArgs::validate`.
pub fn build_run_plan(args: &CliArgs) -> Result<RunPlan, String> {
    debug!("Building run plan from CLI args");

    let config = match config_path(args) {
        Some(path) => load_config_file(&path)?,
        None => ConfigFile::default(),
    };

    let battle_size = args.battle_size.or(config.battle_size).unwrap_or(DEFAULT_BATTLE_SIZE);
    if battle_size == 0 {
        return Err("battle_size must be at least 1".to_string());
    }

    let mode = resolve_mode(args, battle_size)?;
    debug!("Mode: {:?}", mode);

    Ok(RunPlan {
        mode,
        id: args.id.clone().or(config.id).unwrap_or_else(|| DEFAULT_ID.to_string()),
        output_dir: args.output_dir.clone().or(config.output_dir).unwrap_or_else(|| PathBuf::from(".")),
        on_exists: args.on_exists.or(config.on_exists).unwrap_or_default(),
        save: !args.no_save,
    })
}

/// --config wins over $DEX_CONFIG
fn config_path(args: &CliArgs) -> Option<PathBuf> {
    args.config.clone().or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// Read and parse a TOML config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile, String> {
    debug!("Loading config from {:?}", path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

fn resolve_mode(args: &CliArgs, battle_size: usize) -> Result<Mode, String> {
    if let Some(ref roster) = args.trivia {
        return Ok(Mode::Trivia { roster: roster.clone() });
    }
    if let Some(ref roster) = args.dump {
        return Ok(Mode::Dump { roster: roster.clone() });
    }

    let (player1, player2) = match (&args.player1, &args.player2) {
        (Some(p1), Some(p2)) => (p1.clone(), p2.clone()),
        _ => return Err("Both --player1 and --player2 are required".to_string()),
    };

    if args.info {
        Ok(Mode::Info { player1, player2 })
    } else if args.battle {
        Ok(Mode::Battle { player1, player2, size: battle_size })
    } else {
        Err("No report selected".to_string())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
