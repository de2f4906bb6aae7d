use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tempfile::Builder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WriteOutcome {
    Created,
    Updated,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Created => f.write_str("created"),
            WriteOutcome::Updated => f.write_str("updated"),
        }
    }
}

/// Put `block` at the top of the changelog at `path`, creating the file when
/// missing. Prior entries follow after one blank line.
pub(crate) fn prepend_block(path: &Path, block: &str) -> Result<WriteOutcome> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(error) if error.kind() == io::ErrorKind::NotFound => None,
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read changelog `{}`", path.display()));
        }
    };

    let (content, outcome) = match existing {
        Some(prior) => (format!("{block}\n\n{prior}"), WriteOutcome::Updated),
        None => (block.to_owned(), WriteOutcome::Created),
    };
    write_atomic(path, &content)?;
    Ok(outcome)
}

/// Replace `path` with `content` through a sibling temp file and a rename.
///
/// A symlinked `path` is written through to the file it points at. The parent
/// directory must exist. An existing file keeps its permissions; a new one
/// gets `0666` minus the process umask.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let target = resolve_target(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        bail!(
            "directory `{}` does not exist; check --root and the repo layout",
            parent.display()
        );
    }

    let existing_permissions = match fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => None,
        Err(error) => {
            return Err(error).with_context(|| format!("failed to stat `{}`", target.display()));
        }
    };

    let mut temp = temp_file_builder()
        .tempfile_in(parent)
        .with_context(|| format!("failed to create temp file in `{}`", parent.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write temp file for `{}`", target.display()))?;
    if let Some(permissions) = existing_permissions {
        temp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("failed to set permissions for `{}`", target.display()))?;
    }
    temp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush temp file for `{}`", target.display()))?;

    temp.persist(&target)
        .map_err(|error| error.error)
        .with_context(|| format!("failed to replace `{}`", target.display()))?;
    Ok(())
}

/// Follow `path` to the file it names when it is a symlink.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    let is_symlink = fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            let link = fs::read_link(path)
                .with_context(|| format!("failed to read symlink `{}`", path.display()))?;
            Ok(match path.parent() {
                Some(parent) => parent.join(link),
                None => link,
            })
        }
        Err(error) => {
            Err(error).with_context(|| format!("failed to resolve symlink `{}`", path.display()))
        }
    }
}

#[cfg(unix)]
fn temp_file_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_file_builder() -> Builder<'static, 'static> {
    Builder::new()
}
