//! # Backup Management
//!
//! Snapshots and numbered backups of the managed chart files.
//!
//! Two kinds of copies live next to each working file:
//!
//! - **Default snapshot**: a fixed sibling (`values.yaml` -> `values.default`)
//!   holding the pre-substitution text. It is overwritten on every
//!   `apply-vars` run and restored at the end of every install cycle.
//! - **Numbered backups**: `<name>.<N>.bak`. Numbering is per file name and
//!   strictly increasing: the next number is one past the highest existing
//!   one, gaps are tolerated and nothing is ever deleted.
//!
//! Directory scans go through the [`DirectoryListing`] trait so the numbering
//! logic can be exercised against fixed listings. Scans and writes are not
//! locked; two concurrent runs on the same directory can pick the same number.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use regex::Regex;

use crate::error::{Error, Result};
use crate::layout::ManagedFile;

/// Source of directory entry names used for backup numbering.
pub trait DirectoryListing {
    /// Returns the file names (not paths) of the entries in `dir`.
    fn list(&self, dir: &Path) -> Result<Vec<String>>;
}

/// The default `DirectoryListing`, which reads the host filesystem.
pub struct DiskListing;

impl DirectoryListing for DiskListing {
    fn list(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(Error::io("list directory", dir))? {
            let entry = entry.map_err(Error::io("list directory", dir))?;
            // Non UTF-8 names can never match a backup pattern built from a &str
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// Formats the numbered backup name for `name`, e.g. `values.yaml.3.bak`.
pub fn backup_name(name: &str, number: u64) -> String {
    format!("{}.{}.bak", name, number)
}

/// Numbered backup lookup and creation for files in a directory.
pub struct BackupManager {
    listing: Box<dyn DirectoryListing>,
}

impl BackupManager {
    /// Creates a manager that scans the real filesystem.
    pub fn new() -> Self {
        Self {
            listing: Box::new(DiskListing),
        }
    }

    /// Creates a manager with a custom listing, used to supply fixture
    /// directory states in tests.
    pub fn with_listing(listing: Box<dyn DirectoryListing>) -> Self {
        Self { listing }
    }

    /// Returns every backup number present for `name` in `dir`, unsorted.
    pub fn backup_numbers(&self, dir: &Path, name: &str) -> Result<Vec<u64>> {
        let pattern = Regex::new(&format!(r"^{}\.(\d+)\.bak$", regex::escape(name)))?;
        let numbers = self
            .listing
            .list(dir)?
            .iter()
            .filter_map(|entry| pattern.captures(entry))
            .filter_map(|caps| caps[1].parse::<u64>().ok())
            .collect();
        Ok(numbers)
    }

    /// Returns the name the next numbered backup of `name` should use.
    pub fn next_backup_name(&self, dir: &Path, name: &str) -> Result<String> {
        let next = match self.backup_numbers(dir, name)?.into_iter().max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| Error::BackupNumbersExhausted {
                    name: name.to_string(),
                    dir: dir.to_path_buf(),
                })?,
        };
        Ok(backup_name(name, next))
    }

    /// Returns the highest-numbered backup of `name` and its number.
    pub fn latest_backup(&self, dir: &Path, name: &str) -> Result<(String, u64)> {
        match self.backup_numbers(dir, name)?.into_iter().max() {
            Some(number) => Ok((backup_name(name, number), number)),
            None => Err(Error::NotFound {
                what: format!("no backups found for {} in {}", name, dir.display()),
            }),
        }
    }

    /// Writes `contents` as the next numbered backup of `name` and returns
    /// the backup file name.
    pub fn write_backup(&self, dir: &Path, name: &str, contents: &str) -> Result<String> {
        let backup = self.next_backup_name(dir, name)?;
        let path = dir.join(&backup);
        fs::write(&path, contents).map_err(Error::io("write backup", &path))?;
        debug!("wrote {}", path.display());
        Ok(backup)
    }

    /// Copies the working file `name` to its next numbered backup and returns
    /// the backup file name.
    pub fn copy_backup(&self, dir: &Path, name: &str) -> Result<String> {
        let backup = self.next_backup_name(dir, name)?;
        copy_file(&dir.join(name), &dir.join(&backup), "copy backup")?;
        Ok(backup)
    }
}

impl Default for BackupManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the working file to its default snapshot, replacing any previous
/// snapshot.
pub fn snapshot_default(dir: &Path, file: ManagedFile) -> Result<()> {
    copy_file(
        &dir.join(file.name),
        &dir.join(file.default_name),
        "snapshot default",
    )
}

/// Overwrites the working file with its default snapshot.
pub fn restore_default(dir: &Path, file: ManagedFile) -> Result<()> {
    copy_file(
        &dir.join(file.default_name),
        &dir.join(file.name),
        "restore default",
    )
}

/// Overwrites the working file `name` with its backup number `number`.
pub fn restore_backup(dir: &Path, name: &str, number: u64) -> Result<()> {
    copy_file(
        &dir.join(backup_name(name, number)),
        &dir.join(name),
        "restore backup",
    )
}

/// Restores every file from its default snapshot.
///
/// Each restore is attempted independently. Failures are logged and
/// returned, never propagated, so a cleanup pass cannot hide the error that
/// triggered it.
pub fn restore_defaults(dir: &Path, files: &[ManagedFile]) -> Vec<Error> {
    let mut failures = Vec::new();
    for file in files {
        match restore_default(dir, *file) {
            Ok(()) => debug!("restored {} from {}", file.name, file.default_name),
            Err(e) => {
                warn!("could not restore {}: {}", file.name, e);
                failures.push(e);
            }
        }
    }
    failures
}

fn copy_file(src: &Path, dst: &Path, operation: &str) -> Result<()> {
    fs::copy(src, dst).map_err(Error::io(operation, src))?;
    Ok(())
}
