//! Debian and RPM changelog entry rendering.
//!
//! Both templates are embedded in the binary. Field order and wording are
//! consumed by packaging tools (`dpkg-parsechangelog`, `rpmbuild`) and must
//! not drift.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset};
use tera::{Context as TeraContext, Tera};

use crate::release::ReleaseRequest;

use super::util::{DEBIAN_DATE_FORMAT, RPM_DATE_FORMAT};

const DEBIAN_TEMPLATE: &str = include_str!("../../templates/debian-changelog.tera");
const RPM_TEMPLATE: &str = include_str!("../../templates/rpm-changelog.tera");

const VMWARE_FORK_OWNER: &str = "heptio";

/// Render the Debian entry for the package whose `debian` directory is `debian_dir`.
pub(crate) fn render_debian(
    request: &ReleaseRequest,
    debian_dir: &str,
    upstream_slug: &str,
    timestamp: &DateTime<FixedOffset>,
) -> Result<String> {
    let package = debian_package_name(debian_dir)?;
    let mut context = base_context(request, upstream_slug);
    context.insert("package", package);
    context.insert(
        "timestamp",
        &timestamp.format(DEBIAN_DATE_FORMAT).to_string(),
    );
    render(DEBIAN_TEMPLATE, &context, "debian")
}

pub(crate) fn render_rpm(
    request: &ReleaseRequest,
    upstream_slug: &str,
    timestamp: &DateTime<FixedOffset>,
) -> Result<String> {
    let mut context = base_context(request, upstream_slug);
    context.insert("timestamp", &timestamp.format(RPM_DATE_FORMAT).to_string());
    render(RPM_TEMPLATE, &context, "rpm")
}

/// Package name is the directory directly above `debian`.
pub(crate) fn debian_package_name(debian_dir: &str) -> Result<&str> {
    let mut segments = debian_dir.trim_end_matches('/').rsplit('/');
    let _debian = segments.next();
    match segments.next() {
        Some(package) if !package.is_empty() => Ok(package),
        _ => bail!("cannot derive a package name from `{debian_dir}`"),
    }
}

fn base_context(request: &ReleaseRequest, upstream_slug: &str) -> TeraContext {
    let version = &request.version;
    let mut context = TeraContext::new();
    context.insert("version", version);
    context.insert("vmware_patch", &request.vmware_patch);
    context.insert("email", &request.email);
    context.insert(
        "upstream_url",
        &format!("https://github.com/{upstream_slug}/releases/tag/v{version}"),
    );
    context.insert(
        "vmware_url",
        &format!(
            "https://github.com/{VMWARE_FORK_OWNER}/{}/releases/tag/v{}",
            request.repo,
            request.vmware_version()
        ),
    );
    context
}

fn render(template: &str, context: &TeraContext, kind: &str) -> Result<String> {
    let rendered = Tera::one_off(template, context, false)
        .with_context(|| format!("failed to render {kind} changelog template"))?;
    Ok(rendered.trim_end_matches('\n').to_owned())
}
