//! Unit tests for the task aggregate.

use crate::task::domain::{Task, TaskDomainError, TaskName};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
fn empty_task_names_are_rejected(#[case] raw: &str) -> eyre::Result<()> {
    let result = TaskName::new(raw);

    if result != Err(TaskDomainError::EmptyTaskName) {
        bail!("expected EmptyTaskName, got {result:?}");
    }
    Ok(())
}

#[rstest]
fn task_name_is_trimmed() -> eyre::Result<()> {
    let name = TaskName::new("  ship it  ")?;
    ensure!(name.as_str() == "ship it");
    Ok(())
}

#[rstest]
fn a_new_task_is_started_but_not_completed() -> eyre::Result<()> {
    let task = Task::start(TaskName::new("write docs")?, &DefaultClock);

    ensure!(!task.is_completed());
    ensure!(task.completed_at().is_none());
    Ok(())
}

#[rstest]
fn completing_a_task_records_an_end_after_the_start() -> eyre::Result<()> {
    let mut task = Task::start(TaskName::new("write docs")?, &DefaultClock);

    task.complete(&DefaultClock)?;

    ensure!(task.is_completed());
    match task.completed_at() {
        Some(completed_at) => ensure!(completed_at >= task.started_at()),
        None => bail!("expected a completion timestamp"),
    }
    Ok(())
}

#[rstest]
fn completing_twice_is_rejected_and_the_first_end_stands() -> eyre::Result<()> {
    let mut task = Task::start(TaskName::new("write docs")?, &DefaultClock);
    task.complete(&DefaultClock)?;
    let first_completed_at = task.completed_at();

    let result = task.complete(&DefaultClock);

    if result != Err(TaskDomainError::AlreadyCompleted(task.id())) {
        bail!("expected AlreadyCompleted, got {result:?}");
    }
    ensure!(task.completed_at() == first_completed_at);
    Ok(())
}
