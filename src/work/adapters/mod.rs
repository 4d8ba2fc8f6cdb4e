//! Adapter implementations for the work module's ports and boundaries.

pub mod github;
pub mod memory;
pub mod postgres;
