//! Domain model for work-item lifecycle tracking.
//!
//! The work domain models branch-push creation, pull-request association,
//! the two close outcomes (merge vs. abandon), and deployment annotation
//! while keeping all infrastructure concerns outside the domain boundary.

mod branch;
mod commit;
mod error;
mod event;
mod ids;
mod work_item;

pub use branch::BranchName;
pub use commit::MergeCommitSha;
pub use error::{ParseWorkStateError, WorkDomainError};
pub use event::{
    CloseOutcome, DeploymentRecord, PullRequestAction, PullRequestRecord, PushRecord,
};
pub use ids::{PullRequestNumber, WorkItemId};
pub use work_item::{PersistedWorkItemData, WorkItem, WorkState};
