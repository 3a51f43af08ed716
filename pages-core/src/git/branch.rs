//! Publish-branch detection

use super::repo::PagesRepo;

/// Whether the publish branch resolves in a repository
///
/// Deliberately two-cased: an unreadable reference store and a genuinely
/// missing branch both report `Absent`. Ambiguous state never triggers a
/// deployment, only removal or no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// The branch reference resolves to a commit
    Present,
    /// The branch is missing, or its state could not be determined
    Absent,
}

impl BranchState {
    /// True iff the branch is present
    pub fn is_present(self) -> bool {
        matches!(self, BranchState::Present)
    }
}

impl PagesRepo {
    /// Report whether the given local branch currently resolves
    ///
    /// Read-only: never mutates the repository.
    pub fn branch_state(&self, branch: &str) -> BranchState {
        let refname = format!("refs/heads/{}", branch);
        match self.inner().find_reference(&refname) {
            Ok(reference) => match reference.peel_to_commit() {
                Ok(_) => BranchState::Present,
                Err(_) => BranchState::Absent,
            },
            Err(_) => BranchState::Absent,
        }
    }
}
