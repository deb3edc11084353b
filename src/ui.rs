/// User interface and status output utilities
///
/// This module handles:
/// - Colored terminal text
/// - Status message formatting
/// - The usage guide shown after operator mistakes
use std::io::Write;

/// Print the "dex: " prefix for status messages
fn print_status_header() {
    print!("dex: ");
}

/// Print colored text to stderr, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stderr() else {
            return false;
        };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print a status message with "dex: " prefix
pub fn status(s: &str) {
    print_status_header();
    println!("{}", s);
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    eprintln!();
    print_color("error", term::color::BRIGHT_RED);
    eprintln!(": {}", msg);
    eprintln!();
}

/// Print the usage guide to stderr
pub fn print_usage() {
    eprintln!("{}", USAGE);
}

const USAGE: &str = "\
Usage examples:

  TRIVIA
    monster-dex --trivia data/pokemon/pokemons_1.json --id 1
    monster-dex --trivia data/digimon/digimons_1.yaml --id 1

  INFO
    monster-dex --player1 data/pokemon/pokemons_1.json --player2 data/pokemon/pokemons_2.csv --id 1 --info

  BATTLE
    monster-dex --player1 data/digimon/digimons_1.xml --player2 data/digimon/digimons_2.json --id 1 --battle
    monster-dex ... --battle --battle-size 5

  Each team fields its N strongest monsters (default 3); N cannot exceed
  the size of either roster.

Rosters may be .json, .csv, .xml, .yaml or .yml, and the two players may use
different formats. A roster whose records carry a 'stage' field is a Digimon
list, anything else is a Pokemon list.

Reports are saved as <id>_<kind>.txt (id defaults to 0). When the file already
exists you are asked what to do:

  [append|OVERWRITE]
    a, append       keep the existing file and add the new report at the end
    o, overwrite    replace the file with the new report
    <enter>         same as overwrite

Answers ignore case. Use --on-exists append|overwrite to skip the question,
or --no-save to only print the report.
";
