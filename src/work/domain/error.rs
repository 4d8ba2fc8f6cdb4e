//! Error types for work domain validation and lifecycle transitions.

use super::{WorkItemId, WorkState};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain work values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkDomainError {
    /// The branch name is empty, contains whitespace, or is too long.
    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    /// The merge commit hash is empty, too long, or not hexadecimal.
    #[error("invalid merge commit hash: '{0}'")]
    InvalidMergeCommit(String),

    /// The pull request number is invalid.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),

    /// The requested lifecycle transition is not permitted.
    #[error("work item {work_item_id} cannot transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        /// Identifier of the work item that rejected the transition.
        work_item_id: WorkItemId,
        /// State the work item was in.
        from: WorkState,
        /// State the transition targeted.
        to: WorkState,
    },

    /// A merge has already been recorded; merge fields are set exactly once.
    #[error("work item {0} already has a merge recorded")]
    MergeAlreadyRecorded(WorkItemId),

    /// An event timestamp precedes an already-recorded lifecycle timestamp.
    ///
    /// The already-recorded timestamp is left untouched; out-of-order or
    /// duplicate events must not corrupt earlier lifecycle data.
    #[error(
        "timestamp {incoming} for work item {work_item_id} precedes recorded timestamp {recorded}"
    )]
    NonMonotonicTimestamp {
        /// Identifier of the work item that rejected the timestamp.
        work_item_id: WorkItemId,
        /// Lifecycle timestamp already recorded on the work item.
        recorded: DateTime<Utc>,
        /// Timestamp carried by the rejected event.
        incoming: DateTime<Utc>,
    },
}

/// Error returned while parsing work states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown work state: {0}")]
pub struct ParseWorkStateError(pub String);
