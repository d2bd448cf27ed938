//! # Chart Installer
//!
//! The chart-install engine is an external collaborator. This module defines
//! the narrow contract the install workflow relies on, [`ChartInstaller`],
//! and its production implementation, [`HelmCli`], which drives the system
//! `helm` binary.
//!
//! Going through the `helm` command picks up everything the user already has
//! configured for it: kubeconfig and context, `HELM_DRIVER`, registry
//! credentials and plugins.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Everything needed to install one release of a chart.
#[derive(Debug, Clone)]
pub struct InstallRequest<'a> {
    /// Chart directory (or any chart reference the installer understands)
    pub chart: &'a Path,
    /// Fully merged values document
    pub values: &'a Value,
    pub namespace: &'a str,
    pub release: &'a str,
    /// Render and validate only; make no changes to the cluster
    pub dry_run: bool,
}

/// Trait for chart installation - allows mocking in tests
pub trait ChartInstaller {
    /// Installs (or, under dry-run, simulates installing) a release and
    /// returns the installer's report text.
    fn install(&self, request: &InstallRequest<'_>) -> Result<String>;
}

/// Default binary name used when no explicit path is configured.
pub const DEFAULT_HELM_BIN: &str = "helm";

/// `ChartInstaller` backed by the `helm` command line.
///
/// Runs `helm install <release> <chart> --namespace <ns> --create-namespace
/// --values -` and streams the merged values on stdin.
#[derive(Debug, Clone)]
pub struct HelmCli {
    binary: PathBuf,
}

impl HelmCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Command-line arguments for `request`, excluding the binary.
    pub fn args(request: &InstallRequest<'_>) -> Vec<String> {
        let mut args = vec![
            "install".to_string(),
            request.release.to_string(),
            request.chart.display().to_string(),
            "--namespace".to_string(),
            request.namespace.to_string(),
            "--create-namespace".to_string(),
            "--values".to_string(),
            "-".to_string(),
        ];
        if request.dry_run {
            args.push("--dry-run".to_string());
        }
        args
    }
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new(DEFAULT_HELM_BIN)
    }
}

impl ChartInstaller for HelmCli {
    fn install(&self, request: &InstallRequest<'_>) -> Result<String> {
        let values = serde_yaml::to_string(request.values)?;
        let failed = |message: String| Error::ExternalInstall {
            release: request.release.to_string(),
            message,
        };

        let args = Self::args(request);
        debug!("running {} {}", self.binary.display(), args.join(" "));

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to run {}: {}", self.binary.display(), e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A child that exits without reading its values closes the pipe;
            // its exit status below is the meaningful result.
            if let Err(e) = stdin.write_all(values.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(failed(format!("failed to send values: {}", e)));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| failed(format!("failed to wait for {}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(stderr.trim().to_string()));
        }

        info!(
            "{} release {} in namespace {}",
            if request.dry_run { "simulated" } else { "installed" },
            request.release,
            request.namespace
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
