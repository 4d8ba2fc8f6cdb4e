//! Lifecycle correlator: turns normalized events into ledger transitions.

use crate::work::{
    domain::{
        BranchName, CloseOutcome, DeploymentRecord, MergeCommitSha, PullRequestAction,
        PullRequestRecord, PushRecord, WorkDomainError, WorkItem, WorkItemId,
    },
    ports::{WorkLedger, WorkLedgerError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for work lifecycle operations.
///
/// NotFound-style failures carry the correlation key that failed to
/// resolve, so callers can retry or redeliver the event.
#[derive(Debug, Error)]
pub enum WorkLifecycleError {
    /// No work item tracks the branch; a pull-request event arrived before
    /// its push.
    #[error("no work item tracks branch '{0}'")]
    BranchNotTracked(BranchName),

    /// No work item carries the merge commit; a deployment notification
    /// arrived before the merge event.
    #[error("no work item carries merge commit {0}")]
    MergeCommitNotTracked(MergeCommitSha),

    /// The work item does not exist.
    #[error("work item not found: {0}")]
    WorkItemNotFound(WorkItemId),

    /// Domain validation or state-machine rejection.
    #[error(transparent)]
    Domain(#[from] WorkDomainError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] WorkLedgerError),
}

/// Result type for work lifecycle service operations.
pub type WorkLifecycleResult<T> = Result<T, WorkLifecycleError>;

/// Work lifecycle orchestration service.
///
/// Correlates the three independently delivered event types into one work
/// item per logical unit of work. The service holds no state of its own:
/// the ledger is the single source of truth, and out-of-order events
/// surface as typed failures for the caller to retry rather than being
/// buffered internally.
#[derive(Clone)]
pub struct WorkLifecycleService<L, C>
where
    L: WorkLedger,
    C: Clock + Send + Sync,
{
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> WorkLifecycleService<L, C>
where
    L: WorkLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new work lifecycle service.
    #[must_use]
    pub const fn new(ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self { ledger, clock }
    }

    /// Handles a normalized push event.
    ///
    /// Creates a new work item in the started state, unless the latest
    /// work item for the branch is still open: repeated pushes to a
    /// tracked open branch are no-ops returning the existing identifier,
    /// so intermediate commits do not fragment one unit of work into
    /// multiple records. A push to a branch whose latest item is closed
    /// starts a fresh unit of work under the reused name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLifecycleError::Ledger`] when lookup or persistence
    /// fails.
    pub async fn submit_push(&self, push: PushRecord) -> WorkLifecycleResult<WorkItemId> {
        if let Some(existing) = self.ledger.find_latest_by_branch(&push.branch).await? {
            if existing.state().is_open() {
                return Ok(existing.id());
            }
        }

        let work_item = WorkItem::start(push.branch, push.started_at, &*self.clock);
        self.ledger.store(&work_item).await?;
        Ok(work_item.id())
    }

    /// Handles a normalized pull-request event.
    ///
    /// Resolves the work item by branch (pushes are assumed to precede
    /// pull-request events), then dispatches on the action: opened
    /// attaches the pull request number, a merged close records the merge
    /// commit and timestamp together, and an abandoned close marks the
    /// item closed without setting any merge field.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLifecycleError::BranchNotTracked`] when no work item
    /// tracks the branch, a domain error when the lifecycle rejects the
    /// transition, or [`WorkLifecycleError::Ledger`] on persistence
    /// failure. No partial mutation is persisted on failure.
    pub async fn submit_pull_request(
        &self,
        record: PullRequestRecord,
    ) -> WorkLifecycleResult<WorkItemId> {
        let PullRequestRecord {
            branch,
            number,
            action,
        } = record;

        let mut work_item = self
            .ledger
            .find_latest_by_branch(&branch)
            .await?
            .ok_or(WorkLifecycleError::BranchNotTracked(branch))?;

        match action {
            PullRequestAction::Opened => work_item.associate_pull_request(number)?,
            PullRequestAction::Closed(CloseOutcome::Merged { commit, merged_at }) => {
                work_item.record_merge(commit, merged_at)?;
            }
            PullRequestAction::Closed(CloseOutcome::Abandoned) => work_item.mark_abandoned()?,
        }

        self.ledger.update(&work_item).await?;
        Ok(work_item.id())
    }

    /// Handles a normalized deployment notification.
    ///
    /// Resolves the work item by merge commit and records the deployment
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLifecycleError::MergeCommitNotTracked`] when no
    /// merged work item carries the commit (the notification outran the
    /// merge event; the caller retries), a domain error when the
    /// timestamp or state is rejected, or [`WorkLifecycleError::Ledger`]
    /// on persistence failure.
    pub async fn submit_deployment(
        &self,
        record: DeploymentRecord,
    ) -> WorkLifecycleResult<WorkItemId> {
        let DeploymentRecord {
            commit,
            deployed_at,
        } = record;

        let mut work_item = self
            .ledger
            .find_by_merge_commit(&commit)
            .await?
            .ok_or(WorkLifecycleError::MergeCommitNotTracked(commit))?;

        work_item.record_deployment(deployed_at)?;
        self.ledger.update(&work_item).await?;
        Ok(work_item.id())
    }

    /// Retrieves a work item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLifecycleError::WorkItemNotFound`] when the
    /// identifier is unknown, or [`WorkLifecycleError::Ledger`] on lookup
    /// failure.
    pub async fn get(&self, id: WorkItemId) -> WorkLifecycleResult<WorkItem> {
        self.ledger
            .find_by_id(id)
            .await?
            .ok_or(WorkLifecycleError::WorkItemNotFound(id))
    }
}
