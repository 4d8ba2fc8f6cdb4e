//! Ledger port for durable work-item storage and correlation lookup.

use crate::work::domain::{BranchName, MergeCommitSha, WorkItem, WorkItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work-ledger operations.
pub type WorkLedgerResult<T> = Result<T, WorkLedgerError>;

/// Durable store owning the canonical work record per unit of work.
///
/// The ledger is the sole source of ordering truth between independently
/// delivered events: each mutation is committed as one indivisible write and
/// lookups resolve correlation keys (branch name, merge commit) to records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkLedger: Send + Sync {
    /// Stores a new work item.
    ///
    /// Never deduplicates by branch name: every create is a new logical
    /// unit of work, since branch names are reused over time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLedgerError::DuplicateWorkItem`] when the identifier
    /// already exists.
    async fn store(&self, work_item: &WorkItem) -> WorkLedgerResult<()>;

    /// Persists a mutated work item (pull request, merge fields, deployment
    /// timestamp, state) as a single atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLedgerError::NotFound`] when the work item does not
    /// exist.
    async fn update(&self, work_item: &WorkItem) -> WorkLedgerResult<()>;

    /// Finds a work item by internal identifier.
    ///
    /// Returns `None` when the work item does not exist.
    async fn find_by_id(&self, id: WorkItemId) -> WorkLedgerResult<Option<WorkItem>>;

    /// Finds the most recently created work item for a branch name.
    ///
    /// Branch names are reused across separate units of work over time;
    /// only the latest record is a correlation candidate. Returns `None`
    /// when no work item has the branch.
    async fn find_latest_by_branch(
        &self,
        branch: &BranchName,
    ) -> WorkLedgerResult<Option<WorkItem>>;

    /// Finds the work item integrated by the given merge commit.
    ///
    /// Returns `None` when no record carries the commit, which typically
    /// means a deployment notification arrived before the merge event.
    async fn find_by_merge_commit(
        &self,
        commit: &MergeCommitSha,
    ) -> WorkLedgerResult<Option<WorkItem>>;

    /// Returns all work items, for aggregation over historical records.
    async fn list_all(&self) -> WorkLedgerResult<Vec<WorkItem>>;
}

/// Errors returned by work-ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkLedgerError {
    /// A work item with the same identifier already exists.
    #[error("duplicate work item identifier: {0}")]
    DuplicateWorkItem(WorkItemId),

    /// The work item was not found.
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
