//! Pinned version manifest generation.
//!
//! A release manifest is derived from the manifest of the same minor release
//! found under the build system's directory, with the `kubernetes` line
//! repinned to the new version.
mod lookup;
mod rewrite;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::changelog::write::write_atomic;
use crate::release::ReleaseRequest;

pub(crate) const MANIFEST_PREFIX: &str = "essentialpks-v";

/// Build system whose manifest directory is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildSystem {
    Bazel,
    Go,
}

impl BuildSystem {
    pub(crate) fn from_go_build_flag(go_build: bool) -> Self {
        if go_build {
            BuildSystem::Go
        } else {
            BuildSystem::Bazel
        }
    }

    pub(crate) fn manifest_dir(self) -> &'static str {
        match self {
            BuildSystem::Bazel => "bazel",
            BuildSystem::Go => "gobuild",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlannedManifest {
    pub(crate) source: PathBuf,
    pub(crate) path: PathBuf,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WrittenManifest {
    pub(crate) source: PathBuf,
    pub(crate) path: PathBuf,
}

/// Select the source manifest and render the new one without writing it.
pub(crate) fn plan_manifest(request: &ReleaseRequest) -> Result<PlannedManifest> {
    let dir = request.root.join(request.build_system.manifest_dir());
    let source = lookup::select_manifest(&dir, &request.major_minor())?;
    let original = fs::read_to_string(&source)
        .with_context(|| format!("failed to read manifest `{}`", source.display()))?;

    let vmware_version = request.vmware_version();
    let content = rewrite::rewrite_manifest(&original, &rewrite::kubernetes_pin(&vmware_version));
    let path = dir.join(format!("{MANIFEST_PREFIX}{vmware_version}"));

    Ok(PlannedManifest {
        source,
        path,
        content,
    })
}

pub(crate) fn apply_manifest(plan: &PlannedManifest) -> Result<WrittenManifest> {
    write_atomic(&plan.path, &plan.content)?;
    Ok(WrittenManifest {
        source: plan.source.clone(),
        path: plan.path.clone(),
    })
}
