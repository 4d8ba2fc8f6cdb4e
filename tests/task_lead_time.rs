//! End-to-end task tracking: wall-clock lead time measured through the
//! tracker service against the in-memory repository.

use std::sync::Arc;
use std::time::Duration;

use eyre::ensure;
use leadtime::task::{adapters::memory::InMemoryTaskRepository, services::TaskTrackerService};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskTrackerService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskTrackerService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_short_task_reports_a_short_average(service: TestService) -> eyre::Result<()> {
    let task = service.create("lead-time probe").await?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    service.complete(task.id()).await?;

    let average = service.average_lead_time_minutes().await?;

    // 100ms is 0.00166 minutes; leave headroom for scheduling jitter.
    ensure!(
        average > 0.0012 && average < 0.0020,
        "average out of range: {average}"
    );
    Ok(())
}
