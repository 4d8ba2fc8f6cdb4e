//! Branch-name value object identifying the origin of a work item.

use super::WorkDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a branch name stored in a `VARCHAR(255)` column.
const MAX_BRANCH_NAME_LENGTH: usize = 255;

/// Validated Git branch name.
///
/// Branch names must be non-empty after trimming, must not contain
/// whitespace, and must not exceed `MAX_BRANCH_NAME_LENGTH` characters.
/// The `refs/heads/` prefix is stripped at the webhook boundary before a
/// branch name is constructed.
///
/// # Examples
///
///     use leadtime::work::domain::BranchName;
///
///     let name = BranchName::new("feature/my-branch").expect("valid");
///     assert_eq!(name.as_str(), "feature/my-branch");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::InvalidBranchName`] when the value is
    /// empty, contains whitespace, or exceeds the length limit.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if Self::is_invalid_branch_name(normalized) {
            return Err(WorkDomainError::InvalidBranchName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Validates branch name constraints.
    fn is_invalid_branch_name(name: &str) -> bool {
        let is_empty = name.is_empty();
        let contains_whitespace = name.chars().any(char::is_whitespace);
        let exceeds_length_limit = name.len() > MAX_BRANCH_NAME_LENGTH;

        is_empty || contains_whitespace || exceeds_length_limit
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for BranchName {
    type Error = WorkDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
