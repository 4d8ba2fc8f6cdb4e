//! Simple named-task lead-time tracking.
//!
//! A task is the minimal trackable unit: a name, a start timestamp, and an
//! optional completion timestamp. No cross-event correlation happens here;
//! the module exists to measure lead time for work that never touches
//! source control. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
