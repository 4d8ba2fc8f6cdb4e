//! Thread-safe in-memory work ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::work::{
    domain::{BranchName, MergeCommitSha, WorkItem, WorkItemId},
    ports::{WorkLedger, WorkLedgerError, WorkLedgerResult},
};

/// Thread-safe in-memory work ledger.
///
/// Branch entries keep creation order, so latest-by-branch is the last
/// identifier in the entry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkLedger {
    state: Arc<RwLock<InMemoryLedgerState>>,
}

#[derive(Debug, Default)]
struct InMemoryLedgerState {
    items: HashMap<WorkItemId, WorkItem>,
    branch_index: HashMap<String, Vec<WorkItemId>>,
    commit_index: HashMap<String, WorkItemId>,
}

impl InMemoryWorkLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn index_merge_commit(state: &mut InMemoryLedgerState, work_item: &WorkItem) {
    if let Some(commit) = work_item.merge_commit() {
        state
            .commit_index
            .insert(commit.as_str().to_owned(), work_item.id());
    }
}

#[async_trait]
impl WorkLedger for InMemoryWorkLedger {
    async fn store(&self, work_item: &WorkItem) -> WorkLedgerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;
        if state.items.contains_key(&work_item.id()) {
            return Err(WorkLedgerError::DuplicateWorkItem(work_item.id()));
        }

        state
            .branch_index
            .entry(work_item.branch().as_str().to_owned())
            .or_default()
            .push(work_item.id());
        index_merge_commit(&mut state, work_item);
        state.items.insert(work_item.id(), work_item.clone());
        Ok(())
    }

    async fn update(&self, work_item: &WorkItem) -> WorkLedgerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;

        let old_item = state
            .items
            .get(&work_item.id())
            .ok_or(WorkLedgerError::NotFound(work_item.id()))?
            .clone();

        // Reindex the merge commit in case the update set or changed it.
        if let Some(old_commit) = old_item.merge_commit() {
            state.commit_index.remove(old_commit.as_str());
        }
        index_merge_commit(&mut state, work_item);
        state.items.insert(work_item.id(), work_item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkItemId) -> WorkLedgerResult<Option<WorkItem>> {
        let state = self
            .state
            .read()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.items.get(&id).cloned())
    }

    async fn find_latest_by_branch(
        &self,
        branch: &BranchName,
    ) -> WorkLedgerResult<Option<WorkItem>> {
        let state = self
            .state
            .read()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;
        let work_item = state
            .branch_index
            .get(branch.as_str())
            .and_then(|ids| ids.last())
            .and_then(|id| state.items.get(id))
            .cloned();
        Ok(work_item)
    }

    async fn find_by_merge_commit(
        &self,
        commit: &MergeCommitSha,
    ) -> WorkLedgerResult<Option<WorkItem>> {
        let state = self
            .state
            .read()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;
        let work_item = state
            .commit_index
            .get(commit.as_str())
            .and_then(|id| state.items.get(id))
            .cloned();
        Ok(work_item)
    }

    async fn list_all(&self) -> WorkLedgerResult<Vec<WorkItem>> {
        let state = self
            .state
            .read()
            .map_err(|err| WorkLedgerError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.items.values().cloned().collect())
    }
}
