use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::MANIFEST_PREFIX;

/// Pick the manifest to derive a new release from.
///
/// Candidates are files naming `major_minor` as a version component. A single
/// candidate is used directly. Several candidates must all follow the
/// `essentialpks-v<x.y.z>+vmware.<n>` naming, and the highest patch wins.
pub(crate) fn select_manifest(dir: &Path, major_minor: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("manifest directory `{}` does not exist", dir.display());
    }

    let mut candidates = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read manifest directory `{}`", dir.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read manifest directory `{}`", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if names_minor_release(&file_name, major_minor) {
            candidates.push((file_name, path));
        }
    }
    candidates.sort_by(|(left, _), (right, _)| left.cmp(right));

    match candidates.len() {
        0 => bail!(
            "minor release {major_minor} not supported: no manifest in `{}`",
            dir.display()
        ),
        1 => return Ok(candidates.remove(0).1),
        _ => {}
    }

    let mut ranked = Vec::with_capacity(candidates.len());
    for (file_name, path) in &candidates {
        match parse_pinned_name(file_name) {
            Some(pin) if pin.major_minor() == major_minor => ranked.push((pin.rank(), path)),
            _ => bail!(ambiguous_message(major_minor, &candidates)),
        }
    }
    ranked.sort_by_key(|(rank, _)| Reverse(*rank));
    if ranked[0].0 == ranked[1].0 {
        bail!(ambiguous_message(major_minor, &candidates));
    }
    Ok(ranked[0].1.clone())
}

fn ambiguous_message(major_minor: &str, candidates: &[(String, PathBuf)]) -> String {
    let names = candidates
        .iter()
        .map(|(name, _)| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("ambiguous manifest for minor release {major_minor}: {names}")
}

/// `major_minor` appears in `file_name` not preceded by a digit or `.` and
/// followed by `.`, `+`, `-`, or the end of the name.
pub(crate) fn names_minor_release(file_name: &str, major_minor: &str) -> bool {
    if major_minor.is_empty() {
        return false;
    }

    file_name.match_indices(major_minor).any(|(start, matched)| {
        let before = file_name[..start].chars().next_back();
        let after = file_name[start + matched.len()..].chars().next();
        let clean_start = !matches!(before, Some(ch) if ch.is_ascii_digit() || ch == '.');
        let clean_end = matches!(after, None | Some('.' | '+' | '-'));
        clean_start && clean_end
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PinnedName {
    major: u64,
    minor: u64,
    patch: u64,
    vmware: u64,
}

impl PinnedName {
    fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    fn rank(&self) -> (u64, u64) {
        (self.patch, self.vmware)
    }
}

/// Parse `essentialpks-v<major>.<minor>.<patch>+vmware.<n>`.
pub(crate) fn parse_pinned_name(file_name: &str) -> Option<PinnedName> {
    let rest = file_name.strip_prefix(MANIFEST_PREFIX)?;
    let (upstream, vmware) = rest.split_once("+vmware.")?;
    let mut parts = upstream.split('.').map(|part| part.parse::<u64>().ok());
    let major = parts.next()??;
    let minor = parts.next()??;
    let patch = parts.next()??;
    if parts.next().is_some() {
        return None;
    }

    Some(PinnedName {
        major,
        minor,
        patch,
        vmware: vmware.parse().ok()?,
    })
}
