//! Overlay checkout of a branch tree into a directory

use std::path::Path;

use git2::build::CheckoutBuilder;

use super::repo::PagesRepo;
use crate::Result;

impl PagesRepo {
    /// Overlay the tree of a branch onto a destination directory
    ///
    /// Overlay semantics are strict: after the call, the destination holds
    /// exactly the files of the branch tip. Files present from an earlier
    /// branch state but no longer tracked are removed, never left behind.
    /// No rollback is attempted on failure; a failed checkout may leave a
    /// mixed old/new tree until the next successful run.
    ///
    /// The source repository is never written to: the forge owns it, and
    /// checkout must not drop an index file (or anything else) into it.
    pub fn checkout_overlay(&self, branch: &str, dest: &Path) -> Result<()> {
        let reference = self
            .inner()
            .find_reference(&format!("refs/heads/{}", branch))?;
        let tree = reference.peel_to_tree()?;

        let mut opts = CheckoutBuilder::new();
        opts.target_dir(dest)
            .force()
            .update_index(false)
            .remove_untracked(true)
            .remove_ignored(true);

        self.inner().checkout_tree(tree.as_object(), Some(&mut opts))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testutil::commit_files;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_checkout_writes_branch_files() {
        let repo_dir = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        git2::Repository::init_bare(repo_dir.path()).unwrap();
        commit_files(
            repo_dir.path(),
            "gitea-pages",
            &[("index.html", "<html>"), ("style.css", "body {}")],
        );

        let repo = PagesRepo::open_bare(repo_dir.path()).unwrap();
        repo.checkout_overlay("gitea-pages", dest.path()).unwrap();

        let index = fs::read_to_string(dest.path().join("index.html")).unwrap();
        assert_eq!(index, "<html>");
        assert!(dest.path().join("style.css").exists());
    }

    #[test]
    fn test_checkout_removes_files_dropped_from_branch() {
        let repo_dir = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        git2::Repository::init_bare(repo_dir.path()).unwrap();
        commit_files(
            repo_dir.path(),
            "gitea-pages",
            &[("old.html", "x"), ("index.html", "1")],
        );

        let repo = PagesRepo::open_bare(repo_dir.path()).unwrap();
        repo.checkout_overlay("gitea-pages", dest.path()).unwrap();
        assert!(dest.path().join("old.html").exists());

        commit_files(repo_dir.path(), "gitea-pages", &[("index.html", "2")]);
        repo.checkout_overlay("gitea-pages", dest.path()).unwrap();

        assert!(!dest.path().join("old.html").exists());
        let index = fs::read_to_string(dest.path().join("index.html")).unwrap();
        assert_eq!(index, "2");
    }

    #[test]
    fn test_checkout_leaves_source_repository_untouched() {
        let repo_dir = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        git2::Repository::init_bare(repo_dir.path()).unwrap();
        commit_files(repo_dir.path(), "gitea-pages", &[("index.html", "<html>")]);

        let entries_before = list_entries(repo_dir.path());

        let repo = PagesRepo::open_bare(repo_dir.path()).unwrap();
        repo.checkout_overlay("gitea-pages", dest.path()).unwrap();

        assert!(!repo_dir.path().join("index").exists());
        assert_eq!(list_entries(repo_dir.path()), entries_before);
    }

    fn list_entries(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_checkout_missing_branch_fails() {
        let repo_dir = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        git2::Repository::init_bare(repo_dir.path()).unwrap();

        let repo = PagesRepo::open_bare(repo_dir.path()).unwrap();
        assert!(repo.checkout_overlay("gitea-pages", dest.path()).is_err());
    }
}
