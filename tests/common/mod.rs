use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

/// 2019-06-17 17:21:05 UTC
pub const FIXED_EPOCH: &str = "1560792065";

const PACKAGING_DIRS: &[&str] = &[
    "kubernetes/debs/xenial/kubeadm/debian",
    "kubernetes/debs/xenial/kubelet/debian",
    "kubernetes/debs/xenial/kubectl/debian",
    "kubernetes/rpms/specs",
    "cni-plugins/debs/xenial/kubernetes-cni/debian",
    "cni-plugins/rpms/specs",
    "cri-tools/debs/xenial/cri-tools/debian",
    "cri-tools/rpms/specs",
    "bazel",
    "gobuild",
];

/// Temporary packaging repository laid out the way the tool expects.
pub struct TestWorkspace {
    root: TempDir,
}

impl TestWorkspace {
    pub fn new(name: &str) -> Self {
        let root = tempfile::Builder::new()
            .prefix(&format!("pkg-changelog-tests-{name}-"))
            .tempdir()
            .expect("failed to create temp workspace");

        for dir in PACKAGING_DIRS {
            fs::create_dir_all(root.path().join(dir))
                .expect("failed to create packaging directory");
        }

        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        fs::write(self.root.path().join(relative), content).expect("failed to seed file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.path().join(relative))
            .unwrap_or_else(|error| panic!("failed to read {relative}: {error}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.path().join(relative).exists()
    }

    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_pkg-changelog"))
            .current_dir(self.root.path())
            .env("SOURCE_DATE_EPOCH", FIXED_EPOCH)
            .env("NO_COLOR", "1")
            .env_remove("PKG_CHANGELOG_FORCE_COLOR")
            .env_remove("CLICOLOR_FORCE")
            .args(args)
            .output()
            .expect("failed to execute pkg-changelog")
    }
}

pub fn output_stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn output_stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
