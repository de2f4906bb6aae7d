use std::{fmt, str::FromStr};

const DEBIAN_DIST: &str = "debs/xenial";

/// Packaging repositories with a known changelog layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repo {
    Kubernetes,
    CniPlugins,
    CriTools,
}

/// On-disk changelog layout and upstream location of one repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepoDescriptor {
    /// Debian package directories, in write order. Each ends in `debian`.
    pub(crate) debian_changelog_dirs: Vec<String>,
    pub(crate) rpm_spec_dir: String,
    /// `owner/name` of the upstream GitHub project.
    pub(crate) upstream_slug: &'static str,
}

impl Repo {
    pub(crate) const ALL: [Repo; 3] = [Repo::Kubernetes, Repo::CniPlugins, Repo::CriTools];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Repo::Kubernetes => "kubernetes",
            Repo::CniPlugins => "cni-plugins",
            Repo::CriTools => "cri-tools",
        }
    }

    pub(crate) fn descriptor(self) -> RepoDescriptor {
        let (packages, upstream_slug): (&[&str], _) = match self {
            Repo::Kubernetes => (
                &["kubeadm", "kubelet", "kubectl"][..],
                "kubernetes/kubernetes",
            ),
            Repo::CniPlugins => (&["kubernetes-cni"][..], "containernetworking/plugins"),
            Repo::CriTools => (&["cri-tools"][..], "kubernetes-incubator/cri-tools"),
        };
        let name = self.name();

        RepoDescriptor {
            debian_changelog_dirs: packages
                .iter()
                .map(|package| format!("{name}/{DEBIAN_DIST}/{package}/debian"))
                .collect(),
            rpm_spec_dir: format!("{name}/rpms/specs"),
            upstream_slug,
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Repo {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Repo::ALL
            .into_iter()
            .find(|repo| repo.name() == value)
            .ok_or_else(|| {
                let known = Repo::ALL.map(Repo::name).join(", ");
                format!("unrecognized repo `{value}` (expected one of: {known})")
            })
    }
}
