//! Work-item aggregate root and lifecycle state machine.

use super::{
    BranchName, MergeCommitSha, ParseWorkStateError, PullRequestNumber, WorkDomainError, WorkItemId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Work-item lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkState {
    /// A push has been observed; no pull request is associated yet.
    Started,
    /// A pull request is open for the branch.
    InReview,
    /// The pull request was closed with an integration action.
    Merged,
    /// The pull request was closed without integration.
    Abandoned,
    /// The merge commit has been deployed to production.
    Deployed,
}

impl WorkState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::InReview => "in_review",
            Self::Merged => "merged",
            Self::Abandoned => "abandoned",
            Self::Deployed => "deployed",
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    ///
    /// A pull request may be opened zero or one times per work item, so a
    /// close may arrive while the item is still `Started`. Re-opening while
    /// `InReview` and re-deploying while `Deployed` are tolerated repeats.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Started | Self::InReview,
                Self::InReview | Self::Merged | Self::Abandoned
            ) | (Self::Merged | Self::Deployed, Self::Deployed)
        )
    }

    /// Returns whether the work item is still open for lifecycle events
    /// keyed by branch name.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Started | Self::InReview)
    }

    /// Returns whether the state admits no further transitions other than
    /// tolerated repeats.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Abandoned | Self::Deployed)
    }
}

impl TryFrom<&str> for WorkState {
    type Error = ParseWorkStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "started" => Ok(Self::Started),
            "in_review" => Ok(Self::InReview),
            "merged" => Ok(Self::Merged),
            "abandoned" => Ok(Self::Abandoned),
            "deployed" => Ok(Self::Deployed),
            _ => Err(ParseWorkStateError(value.to_owned())),
        }
    }
}

/// Work-item aggregate root.
///
/// One record per logical unit of engineering work, assembled from three
/// independently delivered event types. `started_at` is immutable once set;
/// `merge_commit` and `merged_at` are set together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    id: WorkItemId,
    branch: BranchName,
    pull_request: Option<PullRequestNumber>,
    merge_commit: Option<MergeCommitSha>,
    started_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
    deployed_at: Option<DateTime<Utc>>,
    state: WorkState,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted work-item aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkItemData {
    /// Persisted work-item identifier.
    pub id: WorkItemId,
    /// Persisted branch name.
    pub branch: BranchName,
    /// Persisted pull request number, if any.
    pub pull_request: Option<PullRequestNumber>,
    /// Persisted merge commit, if any.
    pub merge_commit: Option<MergeCommitSha>,
    /// Persisted start timestamp.
    pub started_at: DateTime<Utc>,
    /// Persisted merge timestamp, if any.
    pub merged_at: Option<DateTime<Utc>>,
    /// Persisted deployment timestamp, if any.
    pub deployed_at: Option<DateTime<Utc>>,
    /// Persisted lifecycle state.
    pub state: WorkState,
    /// Persisted record-creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    /// Creates a new work item from the first push observed on a branch.
    ///
    /// `started_at` is the earliest commit timestamp carried by the push;
    /// the clock only stamps `created_at`, which orders records for
    /// latest-by-branch lookup.
    #[must_use]
    pub fn start(branch: BranchName, started_at: DateTime<Utc>, clock: &impl Clock) -> Self {
        Self {
            id: WorkItemId::new(),
            branch,
            pull_request: None,
            merge_commit: None,
            started_at,
            merged_at: None,
            deployed_at: None,
            state: WorkState::Started,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a work item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkItemData) -> Self {
        Self {
            id: data.id,
            branch: data.branch,
            pull_request: data.pull_request,
            merge_commit: data.merge_commit,
            started_at: data.started_at,
            merged_at: data.merged_at,
            deployed_at: data.deployed_at,
            state: data.state,
            created_at: data.created_at,
        }
    }

    /// Returns the work-item identifier.
    #[must_use]
    pub const fn id(&self) -> WorkItemId {
        self.id
    }

    /// Returns the branch that originated the work.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns the associated pull request number, if any.
    #[must_use]
    pub const fn pull_request(&self) -> Option<PullRequestNumber> {
        self.pull_request
    }

    /// Returns the merge commit, if the work has been integrated.
    #[must_use]
    pub const fn merge_commit(&self) -> Option<&MergeCommitSha> {
        self.merge_commit.as_ref()
    }

    /// Returns the start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the merge timestamp, if any.
    #[must_use]
    pub const fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Returns the deployment timestamp, if any.
    #[must_use]
    pub const fn deployed_at(&self) -> Option<DateTime<Utc>> {
        self.deployed_at
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> WorkState {
        self.state
    }

    /// Returns the record-creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Associates a pull request with this work item and moves it to
    /// [`WorkState::InReview`].
    ///
    /// Repeated "opened" deliveries are tolerated: an already-associated
    /// number is overwritten, not appended to.
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::InvalidStateTransition`] when the work
    /// item is no longer open.
    pub fn associate_pull_request(
        &mut self,
        number: PullRequestNumber,
    ) -> Result<(), WorkDomainError> {
        self.ensure_transition(WorkState::InReview)?;
        self.pull_request = Some(number);
        self.state = WorkState::InReview;
        Ok(())
    }

    /// Records the integration of this work item into the main branch.
    ///
    /// Sets `merge_commit` and `merged_at` together, atomically, and moves
    /// the item to [`WorkState::Merged`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::MergeAlreadyRecorded`] on a duplicate
    /// merge, [`WorkDomainError::InvalidStateTransition`] when the item is
    /// not open, or [`WorkDomainError::NonMonotonicTimestamp`] when
    /// `merged_at` precedes the start timestamp. No field is mutated on
    /// failure.
    pub fn record_merge(
        &mut self,
        commit: MergeCommitSha,
        merged_at: DateTime<Utc>,
    ) -> Result<(), WorkDomainError> {
        if self.merged_at.is_some() {
            return Err(WorkDomainError::MergeAlreadyRecorded(self.id));
        }
        self.ensure_transition(WorkState::Merged)?;
        self.ensure_monotonic(self.started_at, merged_at)?;

        self.merge_commit = Some(commit);
        self.merged_at = Some(merged_at);
        self.state = WorkState::Merged;
        Ok(())
    }

    /// Marks this work item as closed without integration.
    ///
    /// No merge fields are set; the record remains for history but never
    /// contributes to lead-time aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::InvalidStateTransition`] when the work
    /// item is no longer open.
    pub fn mark_abandoned(&mut self) -> Result<(), WorkDomainError> {
        self.ensure_transition(WorkState::Abandoned)?;
        self.state = WorkState::Abandoned;
        Ok(())
    }

    /// Records a production deployment of this work item's merge commit.
    ///
    /// A later deployment of the same commit overwrites the timestamp;
    /// redeploys are routine.
    ///
    /// # Errors
    ///
    /// Returns [`WorkDomainError::InvalidStateTransition`] when the work
    /// item has not been merged, or
    /// [`WorkDomainError::NonMonotonicTimestamp`] when `deployed_at`
    /// precedes the merge timestamp. No field is mutated on failure.
    pub fn record_deployment(&mut self, deployed_at: DateTime<Utc>) -> Result<(), WorkDomainError> {
        self.ensure_transition(WorkState::Deployed)?;
        if let Some(merged_at) = self.merged_at {
            self.ensure_monotonic(merged_at, deployed_at)?;
        }

        self.deployed_at = Some(deployed_at);
        self.state = WorkState::Deployed;
        Ok(())
    }

    /// Validates a lifecycle transition against the state machine.
    fn ensure_transition(&self, to: WorkState) -> Result<(), WorkDomainError> {
        if self.state.can_transition_to(to) {
            Ok(())
        } else {
            Err(WorkDomainError::InvalidStateTransition {
                work_item_id: self.id,
                from: self.state,
                to,
            })
        }
    }

    /// Rejects an event timestamp that precedes a recorded one.
    fn ensure_monotonic(
        &self,
        recorded: DateTime<Utc>,
        incoming: DateTime<Utc>,
    ) -> Result<(), WorkDomainError> {
        if incoming < recorded {
            return Err(WorkDomainError::NonMonotonicTimestamp {
                work_item_id: self.id,
                recorded,
                incoming,
            });
        }
        Ok(())
    }
}
