//! Unit tests for lead-time aggregation over the work ledger.

use std::sync::Arc;

use crate::stats::LeadTimeError;
use crate::work::{
    adapters::memory::InMemoryWorkLedger,
    domain::{BranchName, MergeCommitSha, WorkItem},
    ports::WorkLedger,
    services::{LeadStage, LeadTimeQuery, WorkLeadTimeError, WorkLeadTimeService},
};
use chrono::{DateTime, Duration, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

const TOLERANCE: f64 = 1e-9;

#[fixture]
fn ledger() -> Arc<InMemoryWorkLedger> {
    Arc::new(InMemoryWorkLedger::new())
}

fn ts(value: &str) -> eyre::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// Stores a merged work item with the given start and merge lead.
async fn store_merged(
    ledger: &InMemoryWorkLedger,
    branch: &str,
    sha: &str,
    started_at: DateTime<Utc>,
    lead: Duration,
) -> eyre::Result<WorkItem> {
    let mut work_item = WorkItem::start(BranchName::new(branch)?, started_at, &DefaultClock);
    work_item.record_merge(MergeCommitSha::new(sha)?, started_at + lead)?;
    ledger.store(&work_item).await?;
    Ok(work_item)
}

#[expect(
    clippy::float_arithmetic,
    reason = "test assertions compare reported averages within a tolerance"
)]
fn assert_close(actual: f64, expected: f64) -> eyre::Result<()> {
    ensure!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn average_to_merge_is_the_mean_over_merged_items(
    ledger: Arc<InMemoryWorkLedger>,
) -> eyre::Result<()> {
    let start = ts("2021-05-13T07:00:00Z")?;
    store_merged(&ledger, "a", "aa11", start, Duration::minutes(30)).await?;
    store_merged(&ledger, "b", "bb22", start, Duration::minutes(90)).await?;
    let service = WorkLeadTimeService::new(Arc::clone(&ledger));

    let average = service
        .average_minutes(LeadTimeQuery::through(LeadStage::Merged))
        .await?;

    assert_close(average, 60.0)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmerged_and_abandoned_items_do_not_contribute(
    ledger: Arc<InMemoryWorkLedger>,
) -> eyre::Result<()> {
    let start = ts("2021-05-13T07:00:00Z")?;
    store_merged(&ledger, "a", "aa11", start, Duration::minutes(10)).await?;

    let open_item = WorkItem::start(BranchName::new("open")?, start, &DefaultClock);
    ledger.store(&open_item).await?;
    let mut abandoned_item = WorkItem::start(BranchName::new("dropped")?, start, &DefaultClock);
    abandoned_item.mark_abandoned()?;
    ledger.store(&abandoned_item).await?;

    let service = WorkLeadTimeService::new(Arc::clone(&ledger));
    let average = service
        .average_minutes(LeadTimeQuery::through(LeadStage::Merged))
        .await?;

    assert_close(average, 10.0)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn average_to_deployment_only_counts_deployed_items(
    ledger: Arc<InMemoryWorkLedger>,
) -> eyre::Result<()> {
    let start = ts("2021-05-13T07:00:00Z")?;
    let mut deployed_item =
        store_merged(&ledger, "a", "aa11", start, Duration::minutes(30)).await?;
    deployed_item.record_deployment(start + Duration::minutes(120))?;
    ledger.update(&deployed_item).await?;
    store_merged(&ledger, "b", "bb22", start, Duration::minutes(90)).await?;

    let service = WorkLeadTimeService::new(Arc::clone(&ledger));
    let average = service
        .average_minutes(LeadTimeQuery::through(LeadStage::Deployed))
        .await?;

    assert_close(average, 120.0)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn since_filter_excludes_older_work(ledger: Arc<InMemoryWorkLedger>) -> eyre::Result<()> {
    let old_start = ts("2021-04-01T07:00:00Z")?;
    let new_start = ts("2021-05-13T07:00:00Z")?;
    store_merged(&ledger, "old", "aa11", old_start, Duration::minutes(500)).await?;
    store_merged(&ledger, "new", "bb22", new_start, Duration::minutes(20)).await?;

    let service = WorkLeadTimeService::new(Arc::clone(&ledger));
    let average = service
        .average_minutes(
            LeadTimeQuery::through(LeadStage::Merged).since(ts("2021-05-01T00:00:00Z")?),
        )
        .await?;

    assert_close(average, 20.0)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_matching_set_is_a_typed_failure(
    ledger: Arc<InMemoryWorkLedger>,
) -> eyre::Result<()> {
    let service = WorkLeadTimeService::new(Arc::clone(&ledger));

    let result = service
        .average_minutes(LeadTimeQuery::through(LeadStage::Merged))
        .await;

    match result {
        Err(WorkLeadTimeError::LeadTime(LeadTimeError::UndefinedAverage)) => Ok(()),
        other => bail!("expected UndefinedAverage, got {other:?}"),
    }
}
