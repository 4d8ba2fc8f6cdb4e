//! Normalized event records consumed by the lifecycle correlator.
//!
//! The webhook adapter reduces raw forge payloads to these records; the
//! correlator never sees wire shapes.

use super::{BranchName, MergeCommitSha, PullRequestNumber};
use chrono::{DateTime, Utc};

/// A branch push reduced to its correlation identity and start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRecord {
    /// Branch the commits were pushed to, with the ref prefix stripped.
    pub branch: BranchName,
    /// Timestamp of the earliest commit observed in the push.
    pub started_at: DateTime<Utc>,
}

/// A pull-request event reduced to its branch, number, and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Source branch of the pull request.
    pub branch: BranchName,
    /// Pull request number assigned by the forge.
    pub number: PullRequestNumber,
    /// What happened to the pull request.
    pub action: PullRequestAction,
}

/// Pull-request lifecycle action relevant to work tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestAction {
    /// The pull request was opened for review.
    Opened,
    /// The pull request was closed, one way or the other.
    Closed(CloseOutcome),
}

/// The two structurally different outcomes of closing a pull request.
///
/// Modeled as a tagged variant rather than the emptiness of a hash field so
/// callers must match both arms exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Closed with an integration action (merge commit, squash, or rebase).
    Merged {
        /// Main-branch commit that integrated the work.
        commit: MergeCommitSha,
        /// When the pull request was merged.
        merged_at: DateTime<Utc>,
    },
    /// Closed without integration; the work item stays out of aggregation.
    Abandoned,
}

/// A deployment notification reduced to its commit identity and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// Merge commit reported as released to production.
    pub commit: MergeCommitSha,
    /// When the deployment completed.
    pub deployed_at: DateTime<Utc>,
}
