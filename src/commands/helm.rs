//! # Helm Command Implementations
//!
//! The `helm` command group covers the chart values workflow:
//!
//! - **`values`**: print the `@{KEY}` placeholders of a values file as a
//!   template (`KEY: ""`) in JSON or YAML, ready to be filled in as
//!   `variables.json`.
//! - **`apply-vars`**: snapshot the chart's managed files, substitute the
//!   placeholders from `variables.json` and write validated numbered backups.
//! - **`install`**: install the chart with the latest backups merged, then
//!   restore the default snapshots.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use jntool::apply_vars::apply_vars;
use jntool::backup::BackupManager;
use jntool::install::{InstallOptions, InstallWorkflow};
use jntool::installer::{HelmCli, DEFAULT_HELM_BIN};
use jntool::layout::ChartLayout;
use jntool::output::{OutputConfig, Status};
use jntool::values::{extract_from_file, render, OutputFormat};

/// Arguments for the helm command group
#[derive(Args, Debug)]
pub struct HelmArgs {
    #[command(subcommand)]
    command: HelmCommands,
}

#[derive(Subcommand, Debug)]
enum HelmCommands {
    /// Extract all @{VAR} placeholders from a Helm values file
    ///
    /// Emits a mapping VAR -> "" in JSON or YAML for later filling.
    Values(ValuesArgs),

    /// Backup and replace placeholders in Helm chart values files
    ///
    /// Backs up values.yaml, values-tag.yaml and variables.json as .default
    /// files, replaces @{VAR} placeholders in the values files using
    /// variables.json, validates that the result is legal YAML, and writes
    /// numbered backups like values.yaml.1.bak.
    ApplyVars(ApplyVarsArgs),

    /// Install a chart using its latest backup values
    Install(InstallArgs),
}

/// Arguments for `helm values`
#[derive(Args, Debug)]
pub struct ValuesArgs {
    /// Values file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format (json or yaml)
    #[arg(short, long, value_name = "FORMAT", default_value = "json")]
    pub output: String,
}

/// Arguments for `helm apply-vars`
#[derive(Args, Debug)]
pub struct ApplyVarsArgs {
    /// Chart directory containing values.yaml, values-tag.yaml and variables.json
    #[arg(value_name = "CHART_DIR")]
    pub chart_dir: PathBuf,
}

/// Arguments for `helm install`
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Chart directory prepared with apply-vars
    #[arg(value_name = "CHART_DIR")]
    pub chart_dir: PathBuf,

    /// Release name
    #[arg(value_name = "RELEASE")]
    pub release: String,

    /// Kubernetes namespace
    #[arg(short, long, default_value = "default")]
    pub namespace: String,

    /// Simulate installation (dry-run)
    #[arg(long)]
    pub dry_run: bool,

    /// Helm binary used to perform the install
    #[arg(long, value_name = "PATH", env = "JNTOOL_HELM_BIN", default_value = DEFAULT_HELM_BIN)]
    pub helm_bin: PathBuf,
}

/// Execute a `helm` subcommand
pub fn execute(args: HelmArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    match args.command {
        HelmCommands::Values(args) => execute_values(args),
        HelmCommands::ApplyVars(args) => execute_apply_vars(args, &out),
        HelmCommands::Install(args) => execute_install(args, &out),
    }
}

fn execute_values(args: ValuesArgs) -> Result<()> {
    let format: OutputFormat = args.output.parse()?;
    let template = extract_from_file(&args.file)?;
    println!("{}", render(&template, format)?);
    Ok(())
}

fn execute_apply_vars(args: ApplyVarsArgs, out: &OutputConfig) -> Result<()> {
    let report = apply_vars(&args.chart_dir, &ChartLayout::default(), &BackupManager::new())
        .with_context(|| format!("apply-vars failed for {}", args.chart_dir.display()))?;

    for backup in &report.backups {
        println!("{}", out.line(Status::Wrote, backup));
    }
    for (file, key) in &report.unresolved {
        println!(
            "{}",
            out.line(
                Status::Warning,
                &format!("{}: no value for @{{{}}}", file, key)
            )
        );
    }
    println!(
        "{}",
        out.line(
            Status::Done,
            &format!("Completed apply-vars on {}", args.chart_dir.display())
        )
    );
    Ok(())
}

fn execute_install(args: InstallArgs, out: &OutputConfig) -> Result<()> {
    if args.dry_run {
        println!(
            "{}",
            out.line(Status::DryRun, "DRY RUN MODE - the release will only be simulated")
        );
    }

    let backups = BackupManager::new();
    let installer = HelmCli::new(&args.helm_bin);
    let mut workflow = InstallWorkflow::new(&backups, &installer);
    let report = workflow
        .run(&InstallOptions {
            chart_dir: &args.chart_dir,
            release: &args.release,
            namespace: &args.namespace,
            dry_run: args.dry_run,
        })
        .with_context(|| {
            format!(
                "install of {} from {} stopped at {:?}",
                args.release,
                args.chart_dir.display(),
                workflow.state()
            )
        })?;

    if !report.output.trim().is_empty() {
        println!("{}", report.output.trim_end());
    }
    println!(
        "{}",
        out.line(
            Status::Done,
            &format!(
                "Installed {} in namespace {}",
                report.release, report.namespace
            )
        )
    );
    Ok(())
}
