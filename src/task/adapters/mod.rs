//! Adapter implementations for the task module's ports.

pub mod memory;
pub mod postgres;
