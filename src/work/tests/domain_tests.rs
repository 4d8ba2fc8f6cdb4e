//! Unit tests for the work-item aggregate and its state machine.

use crate::work::domain::{
    BranchName, MergeCommitSha, PullRequestNumber, WorkDomainError, WorkItem, WorkState,
};
use chrono::{DateTime, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;

fn ts(value: &str) -> eyre::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn started_item() -> eyre::Result<WorkItem> {
    let branch = BranchName::new("lead-test")?;
    Ok(WorkItem::start(
        branch,
        ts("2021-05-13T09:09:18+02:00")?,
        &DefaultClock,
    ))
}

fn merged_item() -> eyre::Result<WorkItem> {
    let mut work_item = started_item()?;
    work_item.record_merge(
        MergeCommitSha::new("9bd73f28b5ed4597123de1d8ecf509078d99bc84")?,
        ts("2021-05-13T07:26:12Z")?,
    )?;
    Ok(work_item)
}

#[rstest]
#[case(WorkState::Started, WorkState::Started, false)]
#[case(WorkState::Started, WorkState::InReview, true)]
#[case(WorkState::Started, WorkState::Merged, true)]
#[case(WorkState::Started, WorkState::Abandoned, true)]
#[case(WorkState::Started, WorkState::Deployed, false)]
#[case(WorkState::InReview, WorkState::Started, false)]
#[case(WorkState::InReview, WorkState::InReview, true)]
#[case(WorkState::InReview, WorkState::Merged, true)]
#[case(WorkState::InReview, WorkState::Abandoned, true)]
#[case(WorkState::InReview, WorkState::Deployed, false)]
#[case(WorkState::Merged, WorkState::Started, false)]
#[case(WorkState::Merged, WorkState::InReview, false)]
#[case(WorkState::Merged, WorkState::Merged, false)]
#[case(WorkState::Merged, WorkState::Abandoned, false)]
#[case(WorkState::Merged, WorkState::Deployed, true)]
#[case(WorkState::Abandoned, WorkState::Started, false)]
#[case(WorkState::Abandoned, WorkState::InReview, false)]
#[case(WorkState::Abandoned, WorkState::Merged, false)]
#[case(WorkState::Abandoned, WorkState::Abandoned, false)]
#[case(WorkState::Abandoned, WorkState::Deployed, false)]
#[case(WorkState::Deployed, WorkState::Started, false)]
#[case(WorkState::Deployed, WorkState::InReview, false)]
#[case(WorkState::Deployed, WorkState::Merged, false)]
#[case(WorkState::Deployed, WorkState::Abandoned, false)]
#[case(WorkState::Deployed, WorkState::Deployed, true)]
fn can_transition_to_returns_expected(
    #[case] from: WorkState,
    #[case] to: WorkState,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(WorkState::Started, true, false)]
#[case(WorkState::InReview, true, false)]
#[case(WorkState::Merged, false, false)]
#[case(WorkState::Abandoned, false, true)]
#[case(WorkState::Deployed, false, true)]
fn open_and_terminal_flags_return_expected(
    #[case] state: WorkState,
    #[case] open: bool,
    #[case] terminal: bool,
) {
    assert_eq!(state.is_open(), open);
    assert_eq!(state.is_terminal(), terminal);
}

#[rstest]
#[case(WorkState::Started)]
#[case(WorkState::InReview)]
#[case(WorkState::Merged)]
#[case(WorkState::Abandoned)]
#[case(WorkState::Deployed)]
fn state_round_trips_through_storage_representation(
    #[case] state: WorkState,
) -> eyre::Result<()> {
    ensure!(WorkState::try_from(state.as_str()) == Ok(state));
    Ok(())
}

#[rstest]
fn associate_pull_request_moves_started_item_to_in_review() -> eyre::Result<()> {
    let mut work_item = started_item()?;

    work_item.associate_pull_request(PullRequestNumber::new(1)?)?;

    ensure!(work_item.state() == WorkState::InReview);
    ensure!(work_item.pull_request() == Some(PullRequestNumber::new(1)?));
    Ok(())
}

#[rstest]
fn repeated_pull_request_open_overwrites_the_number() -> eyre::Result<()> {
    let mut work_item = started_item()?;
    work_item.associate_pull_request(PullRequestNumber::new(1)?)?;

    work_item.associate_pull_request(PullRequestNumber::new(7)?)?;

    ensure!(work_item.state() == WorkState::InReview);
    ensure!(work_item.pull_request() == Some(PullRequestNumber::new(7)?));
    Ok(())
}

#[rstest]
fn record_merge_sets_commit_and_timestamp_together() -> eyre::Result<()> {
    let mut work_item = started_item()?;
    let commit = MergeCommitSha::new("9bd73f28b5ed4597123de1d8ecf509078d99bc84")?;
    let merged_at = ts("2021-05-13T07:26:12Z")?;

    work_item.record_merge(commit.clone(), merged_at)?;

    ensure!(work_item.state() == WorkState::Merged);
    ensure!(work_item.merge_commit() == Some(&commit));
    ensure!(work_item.merged_at() == Some(merged_at));
    Ok(())
}

#[rstest]
fn record_merge_without_prior_review_is_permitted() -> eyre::Result<()> {
    // A pull request may be opened zero times per work item.
    let mut work_item = started_item()?;
    ensure!(work_item.pull_request().is_none());

    work_item.record_merge(
        MergeCommitSha::new("ecc81403853a621bea766bad50d1fb907d1b2689")?,
        ts("2021-05-13T07:41:12Z")?,
    )?;

    ensure!(work_item.state() == WorkState::Merged);
    Ok(())
}

#[rstest]
fn duplicate_merge_is_rejected_without_mutation() -> eyre::Result<()> {
    let mut work_item = merged_item()?;
    let first_commit = work_item.merge_commit().cloned();
    let first_merged_at = work_item.merged_at();

    let result = work_item.record_merge(
        MergeCommitSha::new("ecc81403853a621bea766bad50d1fb907d1b2689")?,
        ts("2021-05-13T08:00:00Z")?,
    );
    let expected = Err(WorkDomainError::MergeAlreadyRecorded(work_item.id()));

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(work_item.merge_commit().cloned() == first_commit);
    ensure!(work_item.merged_at() == first_merged_at);
    Ok(())
}

#[rstest]
fn merge_timestamp_before_start_is_rejected_without_mutation() -> eyre::Result<()> {
    let mut work_item = started_item()?;

    let result = work_item.record_merge(
        MergeCommitSha::new("9bd73f28b5ed4597123de1d8ecf509078d99bc84")?,
        ts("2021-05-13T06:00:00Z")?,
    );

    match result {
        Err(WorkDomainError::NonMonotonicTimestamp { .. }) => {}
        other => bail!("expected NonMonotonicTimestamp, got {other:?}"),
    }
    ensure!(work_item.merge_commit().is_none());
    ensure!(work_item.merged_at().is_none());
    ensure!(work_item.state() == WorkState::Started);
    Ok(())
}

#[rstest]
fn mark_abandoned_sets_no_merge_fields() -> eyre::Result<()> {
    let mut work_item = started_item()?;
    work_item.associate_pull_request(PullRequestNumber::new(2)?)?;

    work_item.mark_abandoned()?;

    ensure!(work_item.state() == WorkState::Abandoned);
    ensure!(work_item.merge_commit().is_none());
    ensure!(work_item.merged_at().is_none());
    Ok(())
}

#[rstest]
fn abandoned_item_rejects_further_lifecycle_events() -> eyre::Result<()> {
    let mut work_item = started_item()?;
    work_item.mark_abandoned()?;

    let result = work_item.associate_pull_request(PullRequestNumber::new(3)?);

    match result {
        Err(WorkDomainError::InvalidStateTransition { from, to, .. }) => {
            ensure!(from == WorkState::Abandoned);
            ensure!(to == WorkState::InReview);
        }
        other => bail!("expected InvalidStateTransition, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn deployment_before_merge_is_rejected() -> eyre::Result<()> {
    let mut work_item = started_item()?;

    let result = work_item.record_deployment(ts("2021-05-13T10:00:00Z")?);

    match result {
        Err(WorkDomainError::InvalidStateTransition { from, to, .. }) => {
            ensure!(from == WorkState::Started);
            ensure!(to == WorkState::Deployed);
        }
        other => bail!("expected InvalidStateTransition, got {other:?}"),
    }
    ensure!(work_item.deployed_at().is_none());
    Ok(())
}

#[rstest]
fn record_deployment_moves_merged_item_to_deployed() -> eyre::Result<()> {
    let mut work_item = merged_item()?;
    let deployed_at = ts("2021-05-13T10:00:00Z")?;

    work_item.record_deployment(deployed_at)?;

    ensure!(work_item.state() == WorkState::Deployed);
    ensure!(work_item.deployed_at() == Some(deployed_at));
    Ok(())
}

#[rstest]
fn redeployment_overwrites_the_deployment_timestamp() -> eyre::Result<()> {
    let mut work_item = merged_item()?;
    work_item.record_deployment(ts("2021-05-13T10:00:00Z")?)?;
    let later = ts("2021-05-14T10:00:00Z")?;

    work_item.record_deployment(later)?;

    ensure!(work_item.state() == WorkState::Deployed);
    ensure!(work_item.deployed_at() == Some(later));
    Ok(())
}

#[rstest]
fn deployment_timestamp_before_merge_is_rejected_without_mutation() -> eyre::Result<()> {
    let mut work_item = merged_item()?;

    let result = work_item.record_deployment(ts("2021-05-13T07:00:00Z")?);

    match result {
        Err(WorkDomainError::NonMonotonicTimestamp { .. }) => {}
        other => bail!("expected NonMonotonicTimestamp, got {other:?}"),
    }
    ensure!(work_item.deployed_at().is_none());
    ensure!(work_item.state() == WorkState::Merged);
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("has whitespace")]
fn invalid_branch_names_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        BranchName::new(raw),
        Err(WorkDomainError::InvalidBranchName(_))
    ));
}

#[rstest]
#[case("")]
#[case("not-hex!")]
#[case("9bd73f28b5ed4597123de1d8ecf509078d99bc849bd73f28b5ed4597123de1d8e")]
fn invalid_merge_commit_hashes_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        MergeCommitSha::new(raw),
        Err(WorkDomainError::InvalidMergeCommit(_))
    ));
}

#[rstest]
fn zero_pull_request_number_is_rejected() {
    assert!(matches!(
        PullRequestNumber::new(0),
        Err(WorkDomainError::InvalidPullRequestNumber(0))
    ));
}
