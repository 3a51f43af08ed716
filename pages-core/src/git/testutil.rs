//! Shared git fixtures for tests

use std::path::Path;

/// Commit a flat set of files to a branch of a bare repository
///
/// Creates the branch if it does not exist; otherwise appends a commit
/// whose tree contains exactly the given files.
pub fn commit_files(repo_path: &Path, branch: &str, files: &[(&str, &str)]) {
    let repo = git2::Repository::open_bare(repo_path).unwrap();

    let mut builder = repo.treebuilder(None).unwrap();
    for (name, contents) in files {
        let blob = repo.blob(contents.as_bytes()).unwrap();
        builder.insert(name, blob, 0o100644).unwrap();
    }
    let tree_id = builder.write().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let refname = format!("refs/heads/{}", branch);
    let parent = repo
        .find_reference(&refname)
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let sig = git2::Signature::now("test", "test@example.com").unwrap();
    repo.commit(Some(&refname), &sig, &sig, "update pages", &tree, &parents)
        .unwrap();
}

/// Delete a branch reference from a bare repository
pub fn delete_branch(repo_path: &Path, branch: &str) {
    let repo = git2::Repository::open_bare(repo_path).unwrap();
    let mut reference = repo
        .find_reference(&format!("refs/heads/{}", branch))
        .unwrap();
    reference.delete().unwrap();
}
