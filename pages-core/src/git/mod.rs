//! Git operations for pagesd
//!
//! This module provides bare-repository access, publish-branch detection,
//! and overlay checkout of a branch tree into a deployment directory.

mod branch;
mod checkout;
mod repo;

#[cfg(test)]
pub(crate) mod testutil;

pub use branch::BranchState;
pub use repo::PagesRepo;
