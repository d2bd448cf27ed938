//! # Apply Variables Workflow
//!
//! Prepares a chart directory for `install`:
//!
//! 1. Snapshot `values.yaml`, `values-tag.yaml` and `variables.json` to
//!    their `.default` siblings.
//! 2. Load `variables.json`.
//! 3. Substitute `@{KEY}` placeholders in both values files and check that
//!    each result is still valid YAML.
//! 4. Write each substituted text as the next numbered backup of its file,
//!    then write a numbered backup of `variables.json`.
//!
//! Every values file is substituted and validated before the first numbered
//! backup is written, so a bad replacement leaves no partial set of backups.
//! The working files themselves are never modified.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::backup::{snapshot_default, BackupManager};
use crate::error::{Error, Result};
use crate::layout::ChartLayout;
use crate::placeholder::{extract_keys, substitute, VariableMap};
use crate::validate::validate_parse;

/// Files written by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Numbered backups written, in order
    pub backups: Vec<String>,
    /// Placeholders with no value in `variables.json`, as `(file, key)`
    pub unresolved: Vec<(String, String)>,
}

/// Runs the apply-vars workflow on `chart_dir`.
pub fn apply_vars(
    chart_dir: &Path,
    layout: &ChartLayout,
    backups: &BackupManager,
) -> Result<ApplyReport> {
    for file in layout.all() {
        snapshot_default(chart_dir, file)?;
        debug!("snapshot {} -> {}", file.name, file.default_name);
    }

    let vars = VariableMap::from_file(&chart_dir.join(layout.variables.name))?;
    info!("loaded {} variables", vars.len());

    let mut report = ApplyReport::default();
    let mut rendered = Vec::new();
    for file in layout.templated() {
        let path = chart_dir.join(file.name);
        let original = fs::read_to_string(&path).map_err(Error::io("read values", &path))?;
        let replaced = substitute(&original, &vars);
        validate_parse(file.name, &replaced)?;

        for key in extract_keys(&replaced).keys() {
            warn!("{}: no value for placeholder @{{{}}}", file.name, key);
            report
                .unresolved
                .push((file.name.to_string(), key.to_string()));
        }
        rendered.push((file.name, replaced));
    }

    for (name, text) in &rendered {
        let backup = backups.write_backup(chart_dir, name, text)?;
        info!("wrote {}", backup);
        report.backups.push(backup);
    }

    let backup = backups.copy_backup(chart_dir, layout.variables.name)?;
    info!("wrote {}", backup);
    report.backups.push(backup);

    Ok(report)
}
