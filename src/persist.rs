/// Report persistence
///
/// This module handles:
/// - Resolving `<dir>/<id>_<tag>.txt` targets from safe identifiers
/// - Asking what to do when the target already exists
/// - Atomic fresh writes and overwrites, in-place appends
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DexError, Result};
use crate::types::ReportKind;

/// Longest accepted report identifier
const MAX_ID_LEN: usize = 64;

/// Where one report lands on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    dir: PathBuf,
    file_name: String,
}

impl ReportTarget {
    /// Build a target; identifiers outside `[A-Za-z0-9_-]{1,64}` are refused
    pub fn new(dir: impl Into<PathBuf>, id: &str, kind: ReportKind) -> Result<Self> {
        let dir = dir.into();
        let safe = !id.is_empty()
            && id.len() <= MAX_ID_LEN
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !safe {
            return Err(DexError::PathConflict {
                path: dir.join(id),
                reason: format!("identifier must be 1-{} characters of letters, digits, '_' or '-'", MAX_ID_LEN),
            });
        }
        Ok(ReportTarget { file_name: format!("{}_{}.txt", id, kind.file_tag()), dir })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// What to do with an existing report file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Append,
    Overwrite,
    /// Unrecognized answer, kept verbatim for the error message
    Invalid(String),
}

/// Interpret a typed answer. Blank means the default, overwrite.
pub fn parse_choice(raw: &str) -> Choice {
    match raw.trim().to_lowercase().as_str() {
        "a" | "append" => Choice::Append,
        "" | "o" | "overwrite" => Choice::Overwrite,
        _ => Choice::Invalid(raw.trim().to_string()),
    }
}

/// Source of the append/overwrite decision
pub trait ChoicePrompt {
    /// Called only when `file_name` already exists
    fn choose(&mut self, file_name: &str) -> Result<Choice>;
}

/// Asks on stdout and reads one line from stdin
pub struct StdinPrompt;

impl ChoicePrompt for StdinPrompt {
    fn choose(&mut self, file_name: &str) -> Result<Choice> {
        print!("File {} already exists, what do you prefer to do? [append|OVERWRITE] : ", file_name);
        io::stdout().flush().map_err(|e| DexError::io("<stdout>", e))?;

        read_choice(&mut io::stdin().lock())
    }
}

/// Read one answer line. End of input is not an answer: only a typed blank
/// line selects the overwrite default.
fn read_choice(reader: &mut impl BufRead) -> Result<Choice> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| DexError::io("<stdin>", e))?;
    if read == 0 {
        return Err(DexError::InvalidChoice { input: "<end of input>".to_string() });
    }
    Ok(parse_choice(&line))
}

/// Always answers the same way (`--on-exists append|overwrite`)
pub struct FixedPrompt(pub Choice);

impl ChoicePrompt for FixedPrompt {
    fn choose(&mut self, _file_name: &str) -> Result<Choice> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Appended,
    Overwritten,
}

impl WriteOutcome {
    pub fn verb(self) -> &'static str {
        match self {
            WriteOutcome::Created => "Saved",
            WriteOutcome::Appended => "Appended",
            WriteOutcome::Overwritten => "Overwrote",
        }
    }
}

/// Write `text` to `target`, consulting `prompt` only if the file exists.
///
/// An invalid answer fails with `InvalidChoice` and leaves the file as it was.
pub fn persist(text: &str, target: &ReportTarget, prompt: &mut dyn ChoicePrompt) -> Result<WriteOutcome> {
    let path = target.path();
    debug!("Report target: {}", path.display());

    let existing = match fs::metadata(&path) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(DexError::io(&path, e)),
    };

    let outcome = match existing {
        None => {
            fs::create_dir_all(target.dir()).map_err(|e| DexError::io(target.dir(), e))?;
            write_atomic(text, target.dir(), &path, None)?;
            WriteOutcome::Created
        }
        Some(meta) if !meta.is_file() => {
            return Err(DexError::PathConflict { path, reason: "target exists and is not a regular file".into() });
        }
        Some(meta) => {
            let choice = prompt.choose(target.file_name())?;
            debug!("Existing {} -> {:?}", target.file_name(), choice);
            match choice {
                Choice::Append => {
                    append(text, &path)?;
                    WriteOutcome::Appended
                }
                Choice::Overwrite => {
                    write_atomic(text, target.dir(), &path, Some(meta.permissions()))?;
                    WriteOutcome::Overwritten
                }
                Choice::Invalid(input) => return Err(DexError::InvalidChoice { input }),
            }
        }
    };

    info!("{} report {}", outcome.verb(), path.display());
    Ok(outcome)
}

/// Temp file in the same directory, then rename over the target.
///
/// An overwrite keeps the replaced file's permissions; a fresh file gets the
/// usual umask-filtered mode instead of the temp file's private one.
fn write_atomic(text: &str, dir: &Path, path: &Path, keep: Option<fs::Permissions>) -> Result<()> {
    let mut tmp = new_temp_file(dir).map_err(|e| DexError::io(dir, e))?;
    if let Some(permissions) = keep {
        tmp.as_file().set_permissions(permissions).map_err(|e| DexError::io(tmp.path(), e))?;
    }
    tmp.write_all(text.as_bytes()).map_err(|e| DexError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| DexError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| DexError::io(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new().permissions(fs::Permissions::from_mode(0o666)).tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

fn append(text: &str, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new().append(true).open(path).map_err(|e| DexError::io(path, e))?;
    file.write_all(text.as_bytes()).map_err(|e| DexError::io(path, e))
}
