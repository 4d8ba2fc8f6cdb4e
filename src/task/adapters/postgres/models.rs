//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// When the task was started.
    pub started_at: DateTime<Utc>,
    /// When the task was completed, if it has been.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// When the task was started.
    pub started_at: DateTime<Utc>,
    /// When the task was completed, if it has been.
    pub completed_at: Option<DateTime<Utc>>,
}
