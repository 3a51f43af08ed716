//! Bare repository access

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// A bare git repository wrapper providing pagesd-specific operations
pub struct PagesRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path to the bare repository
    path: PathBuf,
}

impl std::fmt::Debug for PagesRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagesRepo")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl PagesRepo {
    /// Open a bare git repository at the given path
    pub fn open_bare(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open_bare(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Config(format!("Not a bare repository: {}", path.display()))
            } else {
                Error::Git(e)
            }
        })?;

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Path to the bare repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get access to the underlying git2 repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_bare() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init_bare(temp.path()).unwrap();

        let repo = PagesRepo::open_bare(temp.path()).unwrap();
        assert_eq!(repo.path(), temp.path());
        assert!(repo.inner().is_bare());
    }

    #[test]
    fn test_open_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = PagesRepo::open_bare(temp.path().join("nope"));
        assert!(result.is_err());
    }
}
