//! # File Moves
//!
//! Scans a directory (non-recursively), filters regular files by extension
//! and/or name substring, optionally renames them, and moves them into one
//! or more destination directories.
//!
//! Matching is case-insensitive for both filters. An empty extension list or
//! an empty substring matches every file, so with [`Condition::Or`] a single
//! empty filter lets everything through.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};

use crate::error::{Error, Result};

/// How the extension and substring filters combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Condition {
    And,
    #[default]
    Or,
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            other => Err(format!("invalid condition '{}': expected 'and' or 'or'", other)),
        }
    }
}

/// Substring replacement applied to file names during a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// What to move and where.
#[derive(Debug, Clone, Default)]
pub struct MoveOptions {
    pub source: PathBuf,
    pub destinations: Vec<PathBuf>,
    /// Extensions including the leading dot, e.g. `.pdf`
    pub extensions: Vec<String>,
    pub substring: String,
    pub condition: Condition,
    pub rename: Option<Rename>,
}

impl MoveOptions {
    /// Whether a file called `name` passes the filters.
    pub fn matches(&self, name: &str) -> bool {
        let ext_match = self.extensions.is_empty() || {
            let ext = extension_of(name);
            self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
        };
        let str_match = self.substring.is_empty()
            || name
                .to_lowercase()
                .contains(&self.substring.to_lowercase());

        match self.condition {
            Condition::And => ext_match && str_match,
            Condition::Or => ext_match || str_match,
        }
    }

    /// The name a matched file is given at its destination.
    pub fn target_name(&self, name: &str) -> String {
        match &self.rename {
            Some(rename) if !rename.from.is_empty() => name.replace(&rename.from, &rename.to),
            _ => name.to_string(),
        }
    }
}

/// A file that was placed at a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Moves every matching file of `options.source` into each destination.
///
/// Each destination is created if needed. With several destinations the
/// file is copied into all but the last and moved into the last, so the
/// source is removed once every copy is in place.
///
/// A destination that resolves to the file itself (the source folder, with
/// no rename) already holds it: the file is copied into the other
/// destinations and stays where it is.
pub fn move_matching(options: &MoveOptions) -> Result<Vec<MovedFile>> {
    let source = &options.source;
    let mut moved = Vec::new();
    if options.destinations.is_empty() {
        info!("no destinations given, nothing to move");
        return Ok(moved);
    }

    let mut entries: Vec<_> = fs::read_dir(source)
        .map_err(Error::io("read source folder", source))?
        .collect::<std::io::Result<_>>()
        .map_err(Error::io("read source folder", source))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_type = entry
            .file_type()
            .map_err(Error::io("read source folder", &entry.path()))?;
        if file_type.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !options.matches(&name) {
            continue;
        }

        let from = entry.path();
        let new_name = options.target_name(&name);
        let mut targets = Vec::with_capacity(options.destinations.len());
        for dest in &options.destinations {
            targets.push(prepare_destination(dest)?.join(&new_name));
        }
        let (in_place, mut others): (Vec<_>, Vec<_>) =
            targets.into_iter().partition(|to| is_same_file(&from, to));
        if !in_place.is_empty() {
            debug!("{} is already in a destination, keeping it", from.display());
        }
        let last = if in_place.is_empty() { others.pop() } else { None };

        for to in others {
            fs::copy(&from, &to).map_err(Error::io("copy file", &to))?;
            debug!("copied {} -> {}", from.display(), to.display());
            moved.push(MovedFile {
                from: from.clone(),
                to,
            });
        }
        if let Some(to) = last {
            move_file(&from, &to)?;
            debug!("moved {} -> {}", from.display(), to.display());
            moved.push(MovedFile { from, to });
        }
    }

    Ok(moved)
}

fn prepare_destination(dest: &Path) -> Result<&Path> {
    fs::create_dir_all(dest).map_err(Error::io("create destination", dest))?;
    Ok(dest)
}

/// Whether `a` and `b` name the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Renames `src` to `dst`, falling back to copy and remove when a plain
/// rename is not possible (for example across filesystems).
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    fs::copy(src, dst).map_err(Error::io("copy file", dst))?;
    fs::remove_file(src).map_err(Error::io("remove moved file", src))?;
    Ok(())
}

/// Extension of `name` from its last dot, or an empty string. A dotfile
/// such as `.env` is all extension.
fn extension_of(name: &str) -> &str {
    name.rfind('.').map_or("", |dot| &name[dot..])
}
