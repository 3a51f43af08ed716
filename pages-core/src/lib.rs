//! Pages Core - Core library for pagesd
//!
//! This crate keeps a tree of deployed static sites in step with the
//! publish branch of a collection of bare git repositories: scanning the
//! two-level `owner/name` namespace, checking branch existence, overlaying
//! branch content onto deployment directories, and reconciling the two
//! trees under a single process-wide lock.

pub mod config;
pub mod deploy;
pub mod error;
pub mod git;
pub mod repo_name;
pub mod scan;
pub mod source;
pub mod sync;

pub use config::{Config, Settings};
pub use deploy::DeployTree;
pub use error::{Error, Result};
pub use repo_name::RepoName;
pub use source::SourceTree;
pub use sync::SyncEngine;
