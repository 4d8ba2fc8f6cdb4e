//! `PostgreSQL` work-ledger implementation.

use super::{
    models::{NewWorkItemRow, WorkItemRow},
    schema::work_items,
};
use crate::work::{
    domain::{
        BranchName, MergeCommitSha, PersistedWorkItemData, PullRequestNumber, WorkItem, WorkItemId,
        WorkState,
    },
    ports::{WorkLedger, WorkLedgerError, WorkLedgerResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by work adapters.
pub type WorkPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed work ledger.
#[derive(Debug, Clone)]
pub struct PostgresWorkLedger {
    pool: WorkPgPool,
}

impl PostgresWorkLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkLedgerError::persistence)?
    }
}

#[async_trait]
impl WorkLedger for PostgresWorkLedger {
    async fn store(&self, work_item: &WorkItem) -> WorkLedgerResult<()> {
        let work_item_id = work_item.id();
        let new_row = to_new_row(work_item)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(work_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkLedgerError::DuplicateWorkItem(work_item_id)
                    }
                    _ => WorkLedgerError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, work_item: &WorkItem) -> WorkLedgerResult<()> {
        let work_item_id = work_item.id();
        let row = to_new_row(work_item)?;

        self.run_blocking(move |connection| {
            // One UPDATE statement per transition keeps each lifecycle
            // mutation indivisible under concurrent webhook delivery.
            let updated =
                diesel::update(work_items::table.filter(work_items::id.eq(row.id)))
                    .set((
                        work_items::pull_request.eq(row.pull_request),
                        work_items::merge_commit.eq(row.merge_commit),
                        work_items::merged_at.eq(row.merged_at),
                        work_items::deployed_at.eq(row.deployed_at),
                        work_items::state.eq(row.state),
                    ))
                    .execute(connection)
                    .map_err(WorkLedgerError::persistence)?;

            if updated == 0 {
                return Err(WorkLedgerError::NotFound(work_item_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkItemId) -> WorkLedgerResult<Option<WorkItem>> {
        self.run_blocking(move |connection| {
            let row = work_items::table
                .filter(work_items::id.eq(id.into_inner()))
                .select(WorkItemRow::as_select())
                .first::<WorkItemRow>(connection)
                .optional()
                .map_err(WorkLedgerError::persistence)?;
            row.map(row_to_work_item).transpose()
        })
        .await
    }

    async fn find_latest_by_branch(
        &self,
        branch: &BranchName,
    ) -> WorkLedgerResult<Option<WorkItem>> {
        let branch_name = branch.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = work_items::table
                .filter(work_items::branch.eq(branch_name))
                .order(work_items::created_at.desc())
                .select(WorkItemRow::as_select())
                .first::<WorkItemRow>(connection)
                .optional()
                .map_err(WorkLedgerError::persistence)?;
            row.map(row_to_work_item).transpose()
        })
        .await
    }

    async fn find_by_merge_commit(
        &self,
        commit: &MergeCommitSha,
    ) -> WorkLedgerResult<Option<WorkItem>> {
        let commit_sha = commit.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = work_items::table
                .filter(work_items::merge_commit.eq(commit_sha))
                .select(WorkItemRow::as_select())
                .first::<WorkItemRow>(connection)
                .optional()
                .map_err(WorkLedgerError::persistence)?;
            row.map(row_to_work_item).transpose()
        })
        .await
    }

    async fn list_all(&self) -> WorkLedgerResult<Vec<WorkItem>> {
        self.run_blocking(|connection| {
            let rows = work_items::table
                .select(WorkItemRow::as_select())
                .load::<WorkItemRow>(connection)
                .map_err(WorkLedgerError::persistence)?;
            rows.into_iter().map(row_to_work_item).collect()
        })
        .await
    }
}

fn to_new_row(work_item: &WorkItem) -> WorkLedgerResult<NewWorkItemRow> {
    let pull_request = work_item
        .pull_request()
        .map(|number| i64::try_from(number.value()))
        .transpose()
        .map_err(WorkLedgerError::persistence)?;

    Ok(NewWorkItemRow {
        id: work_item.id().into_inner(),
        branch: work_item.branch().as_str().to_owned(),
        pull_request,
        merge_commit: work_item
            .merge_commit()
            .map(|commit| commit.as_str().to_owned()),
        started_at: work_item.started_at(),
        merged_at: work_item.merged_at(),
        deployed_at: work_item.deployed_at(),
        state: work_item.state().as_str().to_owned(),
        created_at: work_item.created_at(),
    })
}

fn row_to_work_item(row: WorkItemRow) -> WorkLedgerResult<WorkItem> {
    let WorkItemRow {
        id,
        branch: persisted_branch,
        pull_request: persisted_pull_request,
        merge_commit: persisted_merge_commit,
        started_at,
        merged_at,
        deployed_at,
        state: persisted_state,
        created_at,
    } = row;

    let branch = BranchName::new(persisted_branch).map_err(WorkLedgerError::persistence)?;
    let pull_request = persisted_pull_request
        .map(|number| {
            u64::try_from(number)
                .map_err(WorkLedgerError::persistence)
                .and_then(|value| {
                    PullRequestNumber::new(value).map_err(WorkLedgerError::persistence)
                })
        })
        .transpose()?;
    let merge_commit = persisted_merge_commit
        .map(|sha| MergeCommitSha::new(sha).map_err(WorkLedgerError::persistence))
        .transpose()?;
    let state =
        WorkState::try_from(persisted_state.as_str()).map_err(WorkLedgerError::persistence)?;

    let data = PersistedWorkItemData {
        id: WorkItemId::from_uuid(id),
        branch,
        pull_request,
        merge_commit,
        started_at,
        merged_at,
        deployed_at,
        state,
        created_at,
    };
    Ok(WorkItem::from_persisted(data))
}
