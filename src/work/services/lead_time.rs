//! Lead-time aggregation over the work ledger.

use crate::stats::{self, LeadSample, LeadTimeError};
use crate::work::{
    domain::WorkItem,
    ports::{WorkLedger, WorkLedgerError},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Which lifecycle timestamp ends the measured interval.
///
/// The interval always begins at the work item's start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStage {
    /// Measure start → merge.
    Merged,
    /// Measure start → production deployment.
    Deployed,
}

/// Filter selecting which work items contribute to an average.
///
/// Only items where both ends of the measured interval are populated
/// match; abandoned items never contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadTimeQuery {
    since: Option<DateTime<Utc>>,
    through: LeadStage,
}

impl LeadTimeQuery {
    /// Creates a query measuring up to the given lifecycle stage.
    #[must_use]
    pub const fn through(stage: LeadStage) -> Self {
        Self {
            since: None,
            through: stage,
        }
    }

    /// Restricts the query to work started at or after the given time.
    #[must_use]
    pub const fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Returns the sample for a work item, when the item matches.
    fn sample(&self, work_item: &WorkItem) -> Option<LeadSample> {
        if self
            .since
            .is_some_and(|since| work_item.started_at() < since)
        {
            return None;
        }

        let end = match self.through {
            LeadStage::Merged => work_item.merged_at(),
            LeadStage::Deployed => work_item.deployed_at(),
        }?;

        Some(LeadSample {
            start: work_item.started_at(),
            end,
        })
    }
}

/// Errors returned by work lead-time aggregation.
#[derive(Debug, Error)]
pub enum WorkLeadTimeError {
    /// No work item matched the query; the mean is undefined.
    #[error(transparent)]
    LeadTime(#[from] LeadTimeError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] WorkLedgerError),
}

/// Lead-time aggregation service over the work ledger.
#[derive(Clone)]
pub struct WorkLeadTimeService<L>
where
    L: WorkLedger,
{
    ledger: Arc<L>,
}

impl<L> WorkLeadTimeService<L>
where
    L: WorkLedger,
{
    /// Creates a new lead-time aggregation service.
    #[must_use]
    pub const fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Computes the mean lead time in minutes over matching work items.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLeadTimeError::LeadTime`] when no work item matches
    /// the query, or [`WorkLeadTimeError::Ledger`] when listing fails.
    pub async fn average_minutes(&self, query: LeadTimeQuery) -> Result<f64, WorkLeadTimeError> {
        let samples: Vec<LeadSample> = self
            .ledger
            .list_all()
            .await?
            .iter()
            .filter_map(|work_item| query.sample(work_item))
            .collect();

        Ok(stats::average_minutes(&samples)?)
    }
}
