//! Application services for task tracking.

mod tracker;

pub use tracker::{TaskTrackerError, TaskTrackerResult, TaskTrackerService};
