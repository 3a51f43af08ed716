//! Deployment tree management
//!
//! Deployments are plain directory trees at `<target>/<owner>/<name>`,
//! owned exclusively by this process. Materialization and removal are
//! idempotent; callers decide whether a failure aborts anything.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::git::PagesRepo;
use crate::{scan, RepoName, Result};

/// The deployment directories under a target root
#[derive(Debug, Clone)]
pub struct DeployTree {
    root: PathBuf,
}

impl DeployTree {
    /// Create a view over the target root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The target root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the deployment directory for an identifier
    pub fn deploy_dir(&self, name: &RepoName) -> PathBuf {
        self.root.join(name.owner()).join(name.name())
    }

    /// Enumerate the identifiers currently deployed
    pub fn deployed(&self) -> Result<HashSet<RepoName>> {
        let mut names = HashSet::new();
        for entry in scan::two_level_dirs(&self.root)? {
            if let Ok(name) = RepoName::parse(&entry) {
                names.insert(name);
            }
        }
        Ok(names)
    }

    /// Materialize the publish branch of a repository into its deployment
    ///
    /// Creates the directory if absent, then overlays the branch tree onto
    /// it (removing files the branch no longer tracks).
    pub fn materialize(&self, name: &RepoName, repo: &PagesRepo, branch: &str) -> Result<()> {
        let dir = self.deploy_dir(name);
        fs::create_dir_all(&dir)?;
        repo.checkout_overlay(branch, &dir)
    }

    /// Recursively delete the deployment directory for an identifier
    ///
    /// A directory that does not exist is already removed.
    pub fn remove(&self, name: &RepoName) -> Result<()> {
        match fs::remove_dir_all(self.deploy_dir(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testutil::commit_files;
    use tempfile::TempDir;

    #[test]
    fn test_deploy_dir_layout() {
        let tree = DeployTree::new("/srv/pages");
        let name = RepoName::parse("alice/blog").unwrap();
        assert_eq!(tree.deploy_dir(&name), PathBuf::from("/srv/pages/alice/blog"));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let tree = DeployTree::new(temp.path());
        let name = RepoName::parse("dora/old").unwrap();
        tree.remove(&name).unwrap();
    }

    #[test]
    fn test_remove_deletes_recursively() {
        let temp = TempDir::new().unwrap();
        let tree = DeployTree::new(temp.path());
        let name = RepoName::parse("bob/site").unwrap();

        let dir = tree.deploy_dir(&name);
        fs::create_dir_all(dir.join("assets")).unwrap();
        fs::write(dir.join("assets/app.js"), b"x").unwrap();

        tree.remove(&name).unwrap();
        assert!(!dir.exists());
        // Owner directory is left in place
        assert!(temp.path().join("bob").exists());
    }

    #[test]
    fn test_materialize_creates_and_fills() {
        let repos = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        let repo_dir = repos.path().join("alice/blog.git");
        fs::create_dir_all(&repo_dir).unwrap();
        git2::Repository::init_bare(&repo_dir).unwrap();
        commit_files(&repo_dir, "gitea-pages", &[("index.html", "<html>")]);

        let tree = DeployTree::new(target.path());
        let name = RepoName::parse("alice/blog").unwrap();
        let repo = PagesRepo::open_bare(&repo_dir).unwrap();

        tree.materialize(&name, &repo, "gitea-pages").unwrap();
        assert!(tree.deploy_dir(&name).join("index.html").exists());

        let deployed = tree.deployed().unwrap();
        assert!(deployed.contains(&name));
    }
}
