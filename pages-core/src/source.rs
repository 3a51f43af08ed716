//! The source-repository universe
//!
//! Bare repositories live at `<root>/<owner>/<name>.git`. A repository
//! exists exactly when that directory is present; nothing here ever
//! creates or destroys one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::git::{BranchState, PagesRepo};
use crate::{scan, RepoName, Result};

/// Directory suffix marking a bare repository
const BARE_SUFFIX: &str = ".git";

/// Read-only view of the bare repositories under a root path
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    branch: String,
}

impl SourceTree {
    /// Create a view over `root`, publishing from `branch`
    pub fn new(root: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            branch: branch.into(),
        }
    }

    /// The publish branch shared by all repositories
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The repositories root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the bare repository for an identifier
    pub fn repo_dir(&self, name: &RepoName) -> PathBuf {
        self.root
            .join(name.owner())
            .join(format!("{}{}", name.name(), BARE_SUFFIX))
    }

    /// Whether the bare repository directory exists
    pub fn exists(&self, name: &RepoName) -> bool {
        self.repo_dir(name).is_dir()
    }

    /// Open the bare repository for an identifier
    pub fn open(&self, name: &RepoName) -> Result<PagesRepo> {
        PagesRepo::open_bare(self.repo_dir(name))
    }

    /// Whether the publish branch resolves for an identifier
    ///
    /// An unopenable repository counts as `Absent`, same as a missing
    /// branch.
    pub fn branch_state(&self, name: &RepoName) -> BranchState {
        match self.open(name) {
            Ok(repo) => repo.branch_state(&self.branch),
            Err(_) => BranchState::Absent,
        }
    }

    /// Enumerate the identifiers with a bare repository under the root
    ///
    /// Directories without the `.git` suffix are not part of the universe
    /// and are ignored.
    pub fn available(&self) -> Result<HashSet<RepoName>> {
        let mut names = HashSet::new();
        for entry in scan::two_level_dirs(&self.root)? {
            if let Some(stripped) = entry.strip_suffix(BARE_SUFFIX) {
                if let Ok(name) = RepoName::parse(stripped) {
                    names.insert(name);
                }
            }
        }
        Ok(names)
    }
}
