//! Application services for work-item lifecycle orchestration.

mod lead_time;
mod lifecycle;

pub use lead_time::{LeadStage, LeadTimeQuery, WorkLeadTimeError, WorkLeadTimeService};
pub use lifecycle::{WorkLifecycleError, WorkLifecycleResult, WorkLifecycleService};
