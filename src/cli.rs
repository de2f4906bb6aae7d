//! CLI shape and argument parsing for pkg-changelog.
//!
//! The tool prepends Debian and RPM changelog entries for one release of a
//! supported packaging repository, and optionally writes the pinned version
//! manifest for that release.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::changelog::repo::Repo;

pub(crate) const DEFAULT_EMAIL: &str = "release-engineering@heptio.com";

#[derive(Debug, Parser)]
#[command(
    name = "pkg-changelog",
    disable_version_flag = true,
    about = "Generate Debian and RPM changelog entries for a release",
    long_about = "Generate Debian and RPM changelog entries for a release.\n\n\
Prepends a new entry to `changelog-<major.minor>` for every Debian package of the repo and to\n\
the RPM spec changelog. With `--file`, also writes the pinned version manifest derived from the\n\
manifest of the same minor release.",
    after_help = "Examples:\n\
  pkg-changelog -r kubernetes -v 1.15.0\n\
  pkg-changelog -r cni-plugins -v 0.7.5 --vversion 2 -e packager@example.com\n\
  pkg-changelog -r kubernetes -v 1.15.0 --file -g\n\
  pkg-changelog -r cri-tools -v 1.14.0 --dry-run"
)]
pub struct Cli {
    /// Packaging repository to update: kubernetes, cni-plugins, or cri-tools.
    #[arg(short = 'r', long = "repo", value_name = "name")]
    pub repo: Repo,

    /// Upstream release version, for example `1.15.0`.
    #[arg(short = 'v', long = "version", value_name = "version")]
    pub version: String,

    /// VMware patch counter appended as `+vmware.<n>`.
    #[arg(long = "vversion", value_name = "n", default_value = "1")]
    pub vmware_patch: String,

    /// Maintainer email written into each entry.
    #[arg(short = 'e', long = "email", value_name = "address", default_value = DEFAULT_EMAIL)]
    pub email: String,

    /// Use the go-build manifest directory instead of the bazel one.
    #[arg(short = 'g', action = ArgAction::SetTrue)]
    pub go_build: bool,

    /// Also write the pinned version manifest for this release.
    #[arg(long = "file", action = ArgAction::SetTrue)]
    pub file: bool,

    /// Root of the packaging repository. Defaults to the current directory.
    #[arg(short = 'C', long = "root", value_name = "path", default_value = ".")]
    pub root: PathBuf,

    /// Print the rendered entries without touching any file.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Output format for the report of written files.
    #[arg(long = "format", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::{Cli, DEFAULT_EMAIL, ReportFormat};
    use crate::changelog::repo::Repo;
    use clap::Parser;

    #[test]
    fn defaults_fill_optional_flags() {
        let cli = Cli::try_parse_from(["pkg-changelog", "-r", "kubernetes", "-v", "1.15.0"])
            .expect("arguments should parse");
        assert_eq!(cli.repo, Repo::Kubernetes);
        assert_eq!(cli.version, "1.15.0");
        assert_eq!(cli.vmware_patch, "1");
        assert_eq!(cli.email, DEFAULT_EMAIL);
        assert!(!cli.go_build);
        assert!(!cli.file);
        assert!(!cli.dry_run);
        assert_eq!(cli.format, ReportFormat::Text);
    }

    #[test]
    fn long_flags_are_accepted() {
        let cli = Cli::try_parse_from([
            "pkg-changelog",
            "--repo",
            "cri-tools",
            "--version",
            "1.14.0",
            "--vversion",
            "3",
            "--email",
            "me@example.com",
            "-g",
            "--file",
            "--format",
            "json",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.repo, Repo::CriTools);
        assert_eq!(cli.vmware_patch, "3");
        assert_eq!(cli.email, "me@example.com");
        assert!(cli.go_build);
        assert!(cli.file);
        assert_eq!(cli.format, ReportFormat::Json);
    }

    #[test]
    fn unknown_repo_is_a_parse_error() {
        let error = Cli::try_parse_from(["pkg-changelog", "-r", "etcd", "-v", "1.0.0"])
            .expect_err("unknown repo should be rejected");
        assert!(error.to_string().contains("unrecognized repo"));
    }

    #[test]
    fn version_is_required() {
        assert!(Cli::try_parse_from(["pkg-changelog", "-r", "kubernetes"]).is_err());
    }
}
