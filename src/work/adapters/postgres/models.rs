//! Diesel row models for work-item persistence.

use super::schema::work_items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for work-item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = work_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkItemRow {
    /// Internal work-item identifier.
    pub id: uuid::Uuid,
    /// Branch that originated the work.
    pub branch: String,
    /// Pull request number, once one is opened.
    pub pull_request: Option<i64>,
    /// Merge commit hash, once the work is integrated.
    pub merge_commit: Option<String>,
    /// Earliest commit timestamp observed at push time.
    pub started_at: DateTime<Utc>,
    /// Merge timestamp, set together with the merge commit.
    pub merged_at: Option<DateTime<Utc>>,
    /// Production deployment timestamp.
    pub deployed_at: Option<DateTime<Utc>>,
    /// Work lifecycle state.
    pub state: String,
    /// Record-creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for work-item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = work_items)]
pub struct NewWorkItemRow {
    /// Internal work-item identifier.
    pub id: uuid::Uuid,
    /// Branch that originated the work.
    pub branch: String,
    /// Pull request number, once one is opened.
    pub pull_request: Option<i64>,
    /// Merge commit hash, once the work is integrated.
    pub merge_commit: Option<String>,
    /// Earliest commit timestamp observed at push time.
    pub started_at: DateTime<Utc>,
    /// Merge timestamp, set together with the merge commit.
    pub merged_at: Option<DateTime<Utc>>,
    /// Production deployment timestamp.
    pub deployed_at: Option<DateTime<Utc>>,
    /// Work lifecycle state.
    pub state: String,
    /// Record-creation timestamp.
    pub created_at: DateTime<Utc>,
}
