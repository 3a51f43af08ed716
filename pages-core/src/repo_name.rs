//! Repository identifiers
//!
//! Every repository is addressed by a two-segment `owner/name` pair. The
//! same identifier keys the bare source repository under the repositories
//! root and the deployment directory under the target root.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A validated `owner/name` repository identifier
///
/// Exactly two non-empty segments, no extra separators, no trailing
/// `.git` suffix (the bare-repository suffix belongs to the on-disk
/// layout, not the identifier).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoName(String);

impl RepoName {
    /// Parse an identifier, validating its shape
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let Some((owner, name)) = input.split_once('/') else {
            return Err(Error::Config(format!(
                "Invalid repository name: {}. Expected owner/name.",
                input
            )));
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(Error::Config(format!(
                "Invalid repository name: {}. Expected exactly two non-empty segments.",
                input
            )));
        }

        if name.ends_with(".git") {
            return Err(Error::Config(format!(
                "Invalid repository name: {}. The .git suffix is not part of the name.",
                input
            )));
        }

        Ok(Self(input.to_string()))
    }

    /// The owner segment
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map(|(o, _)| o).unwrap_or(&self.0)
    }

    /// The name segment
    pub fn name(&self) -> &str {
        self.0.split_once('/').map(|(_, n)| n).unwrap_or(&self.0)
    }

    /// The full `owner/name` string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepoName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
