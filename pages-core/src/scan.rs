//! Two-level directory scanning
//!
//! Both the repositories root and the deployment target root use the same
//! layout: one directory per owner, one directory per repository below it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::Result;

/// List the `owner/name` directory pairs under a root
///
/// Non-directory entries at either level are skipped. An unlistable root
/// or owner directory fails the whole scan; callers treat the universe as
/// unknown rather than acting on a partial listing.
pub fn two_level_dirs(root: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();

    for owner_entry in fs::read_dir(root)? {
        let owner_entry = owner_entry?;
        if !owner_entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(owner) = owner_entry.file_name().into_string() else {
            continue;
        };

        for repo_entry in fs::read_dir(owner_entry.path())? {
            let repo_entry = repo_entry?;
            if !repo_entry.file_type()?.is_dir() {
                continue;
            }
            let Ok(repo) = repo_entry.file_name().into_string() else {
                continue;
            };

            names.insert(format!("{}/{}", owner, repo));
        }
    }

    Ok(names)
}
