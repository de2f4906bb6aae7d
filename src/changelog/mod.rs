//! Changelog entry generation.
//!
//! - `repo`: static table of supported packaging repositories.
//! - `template`: Debian and RPM entry rendering.
//! - `write`: prepend an entry to a `changelog-<major.minor>` file.
//!
//! Every entry is rendered before the first file is touched so a template
//! error never leaves a release half-written.
pub(crate) mod repo;
mod template;
pub(crate) mod util;
pub(crate) mod write;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::release::ReleaseRequest;

use self::write::{WriteOutcome, prepend_block};

const CHANGELOG_PREFIX: &str = "changelog-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ChangelogKind {
    Debian,
    Rpm,
}

/// One rendered entry and the changelog file it belongs to.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlannedEntry {
    pub(crate) kind: ChangelogKind,
    pub(crate) path: PathBuf,
    pub(crate) block: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WrittenChangelog {
    pub(crate) kind: ChangelogKind,
    pub(crate) path: PathBuf,
    pub(crate) outcome: WriteOutcome,
}

/// Render the Debian entries (in table order) followed by the RPM entry.
pub(crate) fn plan_entries(
    request: &ReleaseRequest,
    timestamp: &DateTime<FixedOffset>,
) -> Result<Vec<PlannedEntry>> {
    let descriptor = request.repo.descriptor();
    let file_name = format!("{CHANGELOG_PREFIX}{}", request.major_minor());

    let mut entries = Vec::with_capacity(descriptor.debian_changelog_dirs.len() + 1);
    for dir in &descriptor.debian_changelog_dirs {
        let block = template::render_debian(request, dir, descriptor.upstream_slug, timestamp)?;
        entries.push(PlannedEntry {
            kind: ChangelogKind::Debian,
            path: request.root.join(dir).join(&file_name),
            block,
        });
    }

    let block = template::render_rpm(request, descriptor.upstream_slug, timestamp)?;
    entries.push(PlannedEntry {
        kind: ChangelogKind::Rpm,
        path: request.root.join(&descriptor.rpm_spec_dir).join(&file_name),
        block,
    });

    Ok(entries)
}

/// Write planned entries in order. A failure stops at the failing file;
/// files written before it keep their new entry.
pub(crate) fn apply_entries(entries: &[PlannedEntry]) -> Result<Vec<WrittenChangelog>> {
    let mut written = Vec::with_capacity(entries.len());
    for entry in entries {
        let outcome = prepend_block(&entry.path, &entry.block)?;
        written.push(WrittenChangelog {
            kind: entry.kind,
            path: entry.path.clone(),
            outcome,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use chrono::DateTime;

    use super::{ChangelogKind, plan_entries};
    use crate::changelog::repo::Repo;
    use crate::manifest::BuildSystem;
    use crate::release::ReleaseRequest;

    #[test]
    fn kubernetes_plans_three_debian_entries_then_rpm() {
        let request = ReleaseRequest {
            repo: Repo::Kubernetes,
            version: "1.15.0".to_owned(),
            vmware_patch: "1".to_owned(),
            email: "release-engineering@heptio.com".to_owned(),
            build_system: BuildSystem::Bazel,
            generate_manifest: false,
            root: PathBuf::from("/srv/pkg"),
            dry_run: false,
        };
        let timestamp =
            DateTime::parse_from_rfc3339("2019-06-17T10:21:05+00:00").expect("valid timestamp");

        let entries = plan_entries(&request, &timestamp).expect("plan should succeed");

        let kinds = entries.iter().map(|entry| entry.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                ChangelogKind::Debian,
                ChangelogKind::Debian,
                ChangelogKind::Debian,
                ChangelogKind::Rpm
            ]
        );
        let paths = entries
            .iter()
            .map(|entry| entry.path.as_path())
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                Path::new("/srv/pkg/kubernetes/debs/xenial/kubeadm/debian/changelog-1.15"),
                Path::new("/srv/pkg/kubernetes/debs/xenial/kubelet/debian/changelog-1.15"),
                Path::new("/srv/pkg/kubernetes/debs/xenial/kubectl/debian/changelog-1.15"),
                Path::new("/srv/pkg/kubernetes/rpms/specs/changelog-1.15"),
            ]
        );
        assert!(entries[0].block.starts_with("kubeadm (1.15.0+vmware.1-1)"));
        assert!(entries[2].block.starts_with("kubectl (1.15.0+vmware.1-1)"));
        assert!(entries[3].block.starts_with("* Mon Jun 17 2019 "));
    }
}
