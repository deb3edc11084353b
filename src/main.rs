// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod error;
mod ingest;
mod persist;
mod report;
mod stats;
mod types;
mod ui;

use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use cli::OnExists;
use config::{Mode, RunPlan};
use error::DexError;
use persist::{Choice, ChoicePrompt, FixedPrompt, ReportTarget, StdinPrompt, WriteOutcome};
use types::{RecordList, ReportKind, ResultMap};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        ui::print_usage();
        std::process::exit(1);
    }

    // Resolve flags, config file and defaults into one plan
    let plan = match config::build_run_plan(&args) {
        Ok(p) => p,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&plan) {
        ui::print_error(&e.to_string());
        if e.wants_usage() {
            ui::print_usage();
        }
        std::process::exit(1);
    }
}

/// Load, aggregate, render, print and (optionally) save one report
fn run(plan: &RunPlan) -> error::Result<()> {
    let (kind, map) = match &plan.mode {
        Mode::Dump { roster } => return dump(roster),
        Mode::Trivia { roster } => {
            let records = load(roster)?;
            let (species, map) = stats::trivia(&records)?;
            (ReportKind::Trivia(species), map)
        }
        Mode::Info { player1, player2 } => {
            let (p1, p2) = (load(player1)?, load(player2)?);
            let (species, map) = stats::compare(&p1, &p2)?;
            (ReportKind::Comparison(species), map)
        }
        Mode::Battle { player1, player2, size } => {
            let (p1, p2) = (load(player1)?, load(player2)?);
            (ReportKind::Battle, stats::battle(&p1, &p2, *size)?)
        }
    };

    // Refuse unsafe identifiers before anything is printed
    let target = if plan.save { Some(ReportTarget::new(&plan.output_dir, &plan.id, kind)?) } else { None };

    let text = render_now(&map, kind)?;
    print!("{}", text);

    if let Some(target) = target {
        let mut prompt = prompt_for(plan.on_exists);
        let outcome = persist::persist(&text, &target, prompt.as_mut())?;
        let path = target.path();
        ui::status(&match outcome {
            WriteOutcome::Created => format!("Report saved to {}", path.display()),
            WriteOutcome::Appended => format!("New entry added to {} successfully!", path.display()),
            WriteOutcome::Overwritten => format!("File {} overwritten successfully!", path.display()),
        });
    }
    Ok(())
}

fn load(path: &Path) -> error::Result<RecordList> {
    let records = ingest::decode(path)?;
    log::debug!("Loaded {} creatures from {}", records.len(), path.display());
    Ok(records)
}

fn render_now(map: &ResultMap, kind: ReportKind) -> error::Result<String> {
    report::render(map, kind, Local::now().naive_local())
}

fn prompt_for(on_exists: OnExists) -> Box<dyn ChoicePrompt> {
    match on_exists {
        OnExists::Ask => Box::new(StdinPrompt),
        OnExists::Append => Box::new(FixedPrompt(Choice::Append)),
        OnExists::Overwrite => Box::new(FixedPrompt(Choice::Overwrite)),
    }
}

/// Print the normalized records of one roster as JSON
fn dump(roster: &Path) -> error::Result<()> {
    let records = load(roster)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &records).map_err(|e| DexError::io("<stdout>", e.into()))?;
    writeln!(out).map_err(|e| DexError::io("<stdout>", e))
}
