//! Merge-commit value object linking a work item to its integration commit.

use super::WorkDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a commit hash (SHA-256 object names are 64 hex chars).
const MAX_COMMIT_SHA_LENGTH: usize = 64;

/// Validated commit hash of the main-branch commit that integrated a work
/// item.
///
/// A close event that carries no merge commit hash is an abandoned close and
/// never constructs this type, so a `MergeCommitSha` is always non-empty.
///
/// # Examples
///
///     use leadtime::work::domain::MergeCommitSha;
///
///     let sha = MergeCommitSha::new("9bd73f28b5ed4597123de1d8ecf509078d99bc84")
///         .expect("valid");
///     assert_eq!(sha.as_str().len(), 40);
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeCommitSha(String);

impl MergeCommitSha {
    /// Creates a validated merge commit hash.
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::InvalidMergeCommit`] when the value is
    /// empty after trimming, exceeds the length limit, or contains
    /// non-hexadecimal characters.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if Self::is_invalid_sha(normalized) {
            return Err(WorkDomainError::InvalidMergeCommit(raw));
        }

        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Validates commit hash constraints.
    fn is_invalid_sha(sha: &str) -> bool {
        let is_empty = sha.is_empty();
        let exceeds_length_limit = sha.len() > MAX_COMMIT_SHA_LENGTH;
        let contains_non_hex = !sha.chars().all(|c| c.is_ascii_hexdigit());

        is_empty || exceeds_length_limit || contains_non_hex
    }

    /// Returns the commit hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MergeCommitSha {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MergeCommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for MergeCommitSha {
    type Error = WorkDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
