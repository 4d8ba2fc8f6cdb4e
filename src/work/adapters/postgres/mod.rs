//! `PostgreSQL` adapters for work-ledger persistence.

mod ledger;
mod models;
mod schema;

pub use ledger::{PostgresWorkLedger, WorkPgPool};
