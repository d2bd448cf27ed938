//! # Install Workflow
//!
//! Installs a chart using the values prepared by `apply-vars`.
//!
//! The workflow moves through these states:
//!
//! 1. **Idle → BackupLocated**: find the latest numbered backup of
//!    `values.yaml` and `values-tag.yaml`. A missing backup aborts here,
//!    before any file is touched.
//! 2. **BackupLocated → Restored**: copy each backup over its working file.
//! 3. **Restored → Merged**: parse both working files, shallow-merge the tag
//!    file into the values file and write the result back to `values.yaml`.
//! 4. **Merged → Installing**: hand the merged document to the
//!    [`ChartInstaller`].
//! 5. **Installing → Done** on success.
//!
//! Once step 1 has succeeded, a cleanup guard restores every managed file
//! from its `.default` snapshot when the workflow returns, whether it
//! succeeded, failed or panicked. Cleanup failures are logged and never
//! replace the workflow's own result.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde_yaml::Value;

use crate::backup::{restore_backup, restore_defaults, BackupManager};
use crate::error::{Error, Result};
use crate::installer::{ChartInstaller, InstallRequest};
use crate::layout::{ChartLayout, ManagedFile};
use crate::merge::merge;
use crate::validate::validate_parse;

/// Progress of an install run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    BackupLocated,
    Restored,
    Merged,
    Installing,
    Done,
}

/// Parameters of a single install run.
#[derive(Debug, Clone)]
pub struct InstallOptions<'a> {
    pub chart_dir: &'a Path,
    pub release: &'a str,
    pub namespace: &'a str,
    pub dry_run: bool,
}

/// Outcome of a successful install run.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub release: String,
    pub namespace: String,
    pub dry_run: bool,
    /// Merged values handed to the installer
    pub values: Value,
    /// Text reported by the installer
    pub output: String,
}

/// Restores default snapshots when dropped.
struct RestoreDefaultsGuard<'a> {
    dir: &'a Path,
    files: [ManagedFile; 3],
}

impl Drop for RestoreDefaultsGuard<'_> {
    fn drop(&mut self) {
        let failures = restore_defaults(self.dir, &self.files);
        if failures.is_empty() {
            debug!("restored default snapshots in {}", self.dir.display());
        } else {
            warn!(
                "{} of {} default snapshots could not be restored in {}",
                failures.len(),
                self.files.len(),
                self.dir.display()
            );
        }
    }
}

/// Drives one chart install from numbered backups to installer hand-off.
pub struct InstallWorkflow<'a> {
    backups: &'a BackupManager,
    installer: &'a dyn ChartInstaller,
    layout: ChartLayout,
    state: InstallState,
}

impl<'a> InstallWorkflow<'a> {
    pub fn new(backups: &'a BackupManager, installer: &'a dyn ChartInstaller) -> Self {
        Self {
            backups,
            installer,
            layout: ChartLayout::default(),
            state: InstallState::Idle,
        }
    }

    /// Uses a non-default set of managed files.
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The last state reached. After a failed run this is the state in
    /// which the failure happened.
    pub fn state(&self) -> InstallState {
        self.state
    }

    fn advance(&mut self, next: InstallState) {
        debug!("install: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Runs the workflow to completion.
    pub fn run(&mut self, options: &InstallOptions<'_>) -> Result<InstallReport> {
        let dir = options.chart_dir;
        let values_file = self.layout.values;
        let tag_file = self.layout.values_tag;
        self.state = InstallState::Idle;

        let (values_backup, values_number) = self.backups.latest_backup(dir, values_file.name)?;
        let (tag_backup, tag_number) = self.backups.latest_backup(dir, tag_file.name)?;
        info!("using {} and {}", values_backup, tag_backup);
        self.advance(InstallState::BackupLocated);

        let _cleanup = RestoreDefaultsGuard {
            dir,
            files: self.layout.all(),
        };

        restore_backup(dir, values_file.name, values_number)?;
        restore_backup(dir, tag_file.name, tag_number)?;
        self.advance(InstallState::Restored);

        let base = read_document(dir, values_file.name)?;
        let overlay = read_document(dir, tag_file.name)?;
        let merged = merge(base, overlay)?;
        let rendered = serde_yaml::to_string(&merged)?;
        debug!("merged values:\n{}", rendered);
        let values_path = dir.join(values_file.name);
        fs::write(&values_path, &rendered).map_err(Error::io("write merged values", &values_path))?;
        self.advance(InstallState::Merged);

        self.advance(InstallState::Installing);
        let output = self.installer.install(&InstallRequest {
            chart: dir,
            values: &merged,
            namespace: options.namespace,
            release: options.release,
            dry_run: options.dry_run,
        })?;
        self.advance(InstallState::Done);

        Ok(InstallReport {
            release: options.release.to_string(),
            namespace: options.namespace.to_string(),
            dry_run: options.dry_run,
            values: merged,
            output,
        })
    }
}

fn read_document(dir: &Path, name: &str) -> Result<Value> {
    let path = dir.join(name);
    let text = fs::read_to_string(&path).map_err(Error::io("read values", &path))?;
    validate_parse(name, &text)
}
