//! Release pipeline: resolve, render, write, report.

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::changelog::{self, PlannedEntry, WrittenChangelog, repo::Repo, util};
use crate::cli::{Cli, ReportFormat};
use crate::manifest::{self, BuildSystem, PlannedManifest, WrittenManifest};
use crate::output;

/// Everything one invocation needs, fixed once arguments are parsed.
#[derive(Debug, Clone)]
pub(crate) struct ReleaseRequest {
    pub(crate) repo: Repo,
    pub(crate) version: String,
    pub(crate) vmware_patch: String,
    pub(crate) email: String,
    pub(crate) build_system: BuildSystem,
    pub(crate) generate_manifest: bool,
    pub(crate) root: PathBuf,
    pub(crate) dry_run: bool,
}

impl ReleaseRequest {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self> {
        let version = cli.version.trim();
        if version.is_empty() {
            bail!("--version must not be empty");
        }
        let vmware_patch = cli.vmware_patch.trim();
        if vmware_patch.is_empty() {
            bail!("--vversion must not be empty");
        }

        Ok(Self {
            repo: cli.repo,
            version: version.to_owned(),
            vmware_patch: vmware_patch.to_owned(),
            email: cli.email.clone(),
            build_system: BuildSystem::from_go_build_flag(cli.go_build),
            generate_manifest: cli.file,
            root: cli.root.clone(),
            dry_run: cli.dry_run,
        })
    }

    pub(crate) fn major_minor(&self) -> String {
        util::major_minor(&self.version)
    }

    /// `<version>+vmware.<patch>`
    pub(crate) fn vmware_version(&self) -> String {
        format!("{}+vmware.{}", self.version, self.vmware_patch)
    }
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    let request = ReleaseRequest::from_cli(&cli)?;
    if !request.version.contains('.') {
        output::print_warning(format!(
            "version `{}` has no minor component; using `{}` as the changelog suffix",
            request.version,
            request.major_minor()
        ));
    }

    let timestamp = util::timestamp_now()?;
    let entries = changelog::plan_entries(&request, &timestamp)?;
    let planned_manifest = if request.generate_manifest {
        Some(manifest::plan_manifest(&request)?)
    } else {
        None
    };

    if request.dry_run {
        match cli.format {
            ReportFormat::Text => print_plan(&entries, planned_manifest.as_ref()),
            ReportFormat::Json => print_json(&PlanReport {
                schema_version: 1,
                repo: request.repo.name(),
                version: request.vmware_version(),
                changelogs: &entries,
                manifest: planned_manifest.as_ref(),
            })?,
        }
        return Ok(());
    }

    let changelogs = changelog::apply_entries(&entries)?;
    let manifest = planned_manifest
        .as_ref()
        .map(manifest::apply_manifest)
        .transpose()?;
    let report = ReleaseReport {
        schema_version: 1,
        repo: request.repo.name(),
        version: request.vmware_version(),
        changelogs,
        manifest,
    };

    match cli.format {
        ReportFormat::Text => print_text(&report),
        ReportFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn print_plan(entries: &[PlannedEntry], manifest: Option<&PlannedManifest>) {
    for entry in entries {
        output::print_log(format!("would prepend to {}", entry.path.display()));
        println!("{}\n", entry.block);
    }
    if let Some(plan) = manifest {
        output::print_log(format!(
            "would write {} from {}",
            plan.path.display(),
            plan.source.display()
        ));
        print!("{}", plan.content);
        if !plan.content.ends_with('\n') {
            println!();
        }
    }
}

fn print_text(report: &ReleaseReport) {
    for changelog in &report.changelogs {
        output::print_log(format!("{} {}", changelog.outcome, changelog.path.display()));
    }
    if let Some(manifest) = &report.manifest {
        output::print_log(format!(
            "wrote {} from {}",
            manifest.path.display(),
            manifest.source.display()
        ));
    }
}

fn print_json(report: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReleaseReport {
    schema_version: u32,
    repo: &'static str,
    version: String,
    changelogs: Vec<WrittenChangelog>,
    manifest: Option<WrittenManifest>,
}

/// Dry-run counterpart of `ReleaseReport`: what would be written.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    schema_version: u32,
    repo: &'static str,
    version: String,
    changelogs: &'a [PlannedEntry],
    manifest: Option<&'a PlannedManifest>,
}
