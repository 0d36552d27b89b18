//! Installation mode detection.
//!
//! An installation is "source-controlled" when its root holds a `.git`
//! entry AND a `git` executable can be found on PATH. Every git-backed
//! query branches on this flag; it is computed once when a
//! [`Version`](crate::Version) is built and never refreshed.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::shell::{parse_system_path, resolve_tool_path};

/// Name of the git executable looked up on PATH.
#[cfg(not(windows))]
pub const GIT_BINARY: &str = "git";

/// Name of the git executable looked up on PATH.
#[cfg(windows)]
pub const GIT_BINARY: &str = "git.exe";

/// Whether the installation is a usable git checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallationMode {
    source_controlled: bool,
}

impl InstallationMode {
    /// Detect the mode of `install_dir` using the system PATH.
    pub fn detect(install_dir: &Path) -> Self {
        Self::detect_with_path(install_dir, &parse_system_path())
    }

    /// Detect the mode of `install_dir` against explicit PATH entries.
    pub fn detect_with_path(install_dir: &Path, path_entries: &[PathBuf]) -> Self {
        let repo = repo_present(install_dir);
        let binary = binary_exists(path_entries);
        tracing::debug!(
            "Installation at {}: repository present = {}, git on PATH = {}",
            install_dir.display(),
            repo,
            binary
        );
        Self {
            source_controlled: repo && binary,
        }
    }

    /// A git checkout with git available.
    pub fn source_controlled() -> Self {
        Self {
            source_controlled: true,
        }
    }

    /// A packaged (non-git) installation.
    pub fn packaged() -> Self {
        Self {
            source_controlled: false,
        }
    }

    pub fn is_source_controlled(&self) -> bool {
        self.source_controlled
    }
}

/// Whether `install_dir` has git metadata (a `.git` directory, or a `.git`
/// file for worktrees and submodules).
pub fn repo_present(install_dir: &Path) -> bool {
    install_dir.join(".git").exists()
}

/// Whether a git executable is resolvable in `path_entries`.
pub fn binary_exists(path_entries: &[PathBuf]) -> bool {
    resolve_tool_path(GIT_BINARY, path_entries).is_some()
}
