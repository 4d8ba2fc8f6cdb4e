//! GitHub webhook payloads and event normalization.
//!
//! Pure, stateless conversion from the three raw webhook shapes (push,
//! pull request, deployment notification) into the domain event records
//! consumed by the lifecycle service. Webhook signature validation and HTTP
//! routing live outside this crate.

use crate::work::domain::{
    BranchName, CloseOutcome, DeploymentRecord, MergeCommitSha, PullRequestAction,
    PullRequestNumber, PullRequestRecord, PushRecord, WorkDomainError,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Git ref prefix identifying branch pushes.
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Raw `push` webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    /// Full Git ref the commits were pushed to, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Commits contained in the push, in delivery order.
    pub commits: Vec<CommitPayload>,
}

/// One commit within a push payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    /// Author timestamp of the commit.
    pub timestamp: DateTime<Utc>,
}

/// Raw `pull_request` webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// Action string reported by the forge (`opened`, `closed`, ...).
    pub action: String,
    /// Pull request number.
    pub number: u64,
    /// Nested pull request detail.
    pub pull_request: PullRequestDetail,
}

/// Nested detail object of a pull-request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestDetail {
    /// Head (source) branch of the pull request.
    pub head: HeadRef,
    /// Merge timestamp; present only on a merged close.
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    /// Merge commit hash; non-empty only on a merged close.
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
}

/// Head ref of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadRef {
    /// Branch name, without the `refs/heads/` prefix.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

/// Raw deployment-completed notification payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentPayload {
    /// Main-branch commit that was released.
    pub commit: String,
    /// When the deployment completed.
    pub deployed_at: DateTime<Utc>,
}

/// Errors returned while normalizing raw webhook payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The push carried no commits, so no start time can be derived.
    ///
    /// Rejected rather than defaulting to "now", which would fabricate a
    /// start time the forge never reported.
    #[error("push to branch '{branch}' carries no commits")]
    EmptyPush {
        /// Branch the empty push targeted.
        branch: String,
    },

    /// A merged close arrived without a merge timestamp.
    #[error("pull request {number} closed as merged but carries no merged_at timestamp")]
    MissingMergedTimestamp {
        /// Pull request number from the payload.
        number: u64,
    },

    /// The pull-request action is not relevant to work tracking.
    #[error("unsupported pull request action: '{0}'")]
    UnsupportedPullRequestAction(String),

    /// A payload field failed domain validation.
    #[error(transparent)]
    Domain(#[from] WorkDomainError),
}

/// Normalizes a push payload into a [`PushRecord`].
///
/// Strips the `refs/heads/` prefix from the ref and takes the minimum
/// commit timestamp as the branch start time.
///
/// # Errors
///
/// Returns [`NormalizeError::EmptyPush`] when the commit list is empty, or
/// a domain error when the branch name is invalid.
pub fn normalize_push(payload: &PushPayload) -> Result<PushRecord, NormalizeError> {
    let branch_name = payload
        .git_ref
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(&payload.git_ref);
    let branch = BranchName::new(branch_name)?;

    let started_at = payload
        .commits
        .iter()
        .map(|commit| commit.timestamp)
        .min()
        .ok_or_else(|| NormalizeError::EmptyPush {
            branch: branch.as_str().to_owned(),
        })?;

    Ok(PushRecord { branch, started_at })
}

/// Normalizes a pull-request payload into a [`PullRequestRecord`].
///
/// A close with a non-empty `merge_commit_sha` is
/// [`CloseOutcome::Merged`]; a close without one (rebase onto main, or a
/// plain close) is [`CloseOutcome::Abandoned`] and never fabricates a
/// synthetic merge record.
///
/// # Errors
///
/// Returns [`NormalizeError::UnsupportedPullRequestAction`] for actions
/// other than `opened`/`closed`,
/// [`NormalizeError::MissingMergedTimestamp`] for a merged close without
/// `merged_at`, or a domain error when a field fails validation.
pub fn normalize_pull_request(
    payload: &PullRequestPayload,
) -> Result<PullRequestRecord, NormalizeError> {
    let branch = BranchName::new(payload.pull_request.head.git_ref.as_str())?;
    let number = PullRequestNumber::new(payload.number)?;

    let action = match payload.action.as_str() {
        "opened" => PullRequestAction::Opened,
        "closed" => PullRequestAction::Closed(close_outcome(payload)?),
        other => return Err(NormalizeError::UnsupportedPullRequestAction(other.to_owned())),
    };

    Ok(PullRequestRecord {
        branch,
        number,
        action,
    })
}

/// Derives the close outcome from the merge commit hash.
fn close_outcome(payload: &PullRequestPayload) -> Result<CloseOutcome, NormalizeError> {
    let merge_sha = payload
        .pull_request
        .merge_commit_sha
        .as_deref()
        .filter(|sha| !sha.trim().is_empty());

    match merge_sha {
        None => Ok(CloseOutcome::Abandoned),
        Some(sha) => {
            let commit = MergeCommitSha::new(sha)?;
            let merged_at = payload.pull_request.merged_at.ok_or(
                NormalizeError::MissingMergedTimestamp {
                    number: payload.number,
                },
            )?;
            Ok(CloseOutcome::Merged { commit, merged_at })
        }
    }
}

/// Normalizes a deployment payload into a [`DeploymentRecord`].
///
/// # Errors
///
/// Returns a domain error when the commit hash is empty or malformed.
pub fn normalize_deployment(
    payload: &DeploymentPayload,
) -> Result<DeploymentRecord, NormalizeError> {
    let commit = MergeCommitSha::new(payload.commit.as_str())?;
    Ok(DeploymentRecord {
        commit,
        deployed_at: payload.deployed_at,
    })
}
