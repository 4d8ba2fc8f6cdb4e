//! Unit tests for the work module.

mod domain_tests;
mod lead_time_tests;
