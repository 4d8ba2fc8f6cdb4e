//! In-memory work-ledger adapter.

mod ledger;

pub use ledger::InMemoryWorkLedger;
