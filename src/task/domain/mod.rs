//! Domain model for named-task tracking.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskName};
