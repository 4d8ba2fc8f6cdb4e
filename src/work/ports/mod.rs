//! Port contracts for work-item persistence.

mod ledger;

pub use ledger::{WorkLedger, WorkLedgerError, WorkLedgerResult};

#[cfg(test)]
pub use ledger::MockWorkLedger;
