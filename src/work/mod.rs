//! Git-based work-item lifecycle tracking.
//!
//! This module correlates three independently delivered GitHub event types
//! (branch push, pull request, deployment notification) into one work item
//! per logical unit of work, and computes lead-time statistics over the
//! resulting timestamps. It follows hexagonal architecture:
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
