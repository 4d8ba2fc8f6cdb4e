//! Leadtime: lead-time tracking for engineering work.
//!
//! This crate measures the elapsed time from starting a unit of work to its
//! completion, at two granularities: a simple named task with start and
//! completion timestamps, and a git-based work item correlated from push,
//! pull-request, and deployment events.
//!
//! # Architecture
//!
//! Leadtime follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, webhooks)
//!
//! # Modules
//!
//! - [`work`]: Git-based work-item lifecycle tracking and event correlation
//! - [`task`]: Simple named-task tracking
//! - [`stats`]: Lead-time averaging shared by both trackers

pub mod stats;
pub mod task;
pub mod work;
