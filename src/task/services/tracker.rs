//! Service layer for task creation, completion, and lead-time averaging.

use crate::stats::{self, LeadSample, LeadTimeError};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskName},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task tracking operations.
#[derive(Debug, Error)]
pub enum TaskTrackerError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// No completed task exists; the mean is undefined.
    #[error(transparent)]
    LeadTime(#[from] LeadTimeError),
}

/// Result type for task tracker service operations.
pub type TaskTrackerResult<T> = Result<T, TaskTrackerError>;

/// Task tracking orchestration service.
#[derive(Clone)]
pub struct TaskTrackerService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskTrackerService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task tracker service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task started at the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTrackerError::Domain`] when the name is empty, or
    /// [`TaskTrackerError::Repository`] when persistence fails.
    pub async fn create(&self, name: &str) -> TaskTrackerResult<Task> {
        let task_name = TaskName::new(name)?;
        let task = Task::start(task_name, &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Completes a task by recording the current clock time as its end.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTrackerError::TaskNotFound`] when the identifier is
    /// unknown, [`TaskTrackerError::Domain`] when the task is already
    /// completed, or [`TaskTrackerError::Repository`] when persistence
    /// fails.
    pub async fn complete(&self, id: TaskId) -> TaskTrackerResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskTrackerError::TaskNotFound(id))?;

        task.complete(&*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTrackerError::TaskNotFound`] when the identifier is
    /// unknown, or [`TaskTrackerError::Repository`] on lookup failure.
    pub async fn get(&self, id: TaskId) -> TaskTrackerResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskTrackerError::TaskNotFound(id))
    }

    /// Computes the mean lead time in minutes over completed tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTrackerError::LeadTime`] when no task has been
    /// completed, or [`TaskTrackerError::Repository`] when listing fails.
    pub async fn average_lead_time_minutes(&self) -> TaskTrackerResult<f64> {
        let samples: Vec<LeadSample> = self
            .repository
            .list_all()
            .await?
            .iter()
            .filter_map(|task| {
                task.completed_at().map(|end| LeadSample {
                    start: task.started_at(),
                    end,
                })
            })
            .collect();

        Ok(stats::average_minutes(&samples)?)
    }
}
