//! # recurslot scheduler
//!
//! Keeps a rolling window of concrete, bookable slots in the store for every
//! recurring availability pattern. Patterns are never stored on their own;
//! they are rebuilt from the slots each run (see [`reconstruct`]).

pub mod config;
pub mod dedup;
pub mod maintainer;
pub mod reconstruct;
pub mod report;
pub mod stats;

pub use config::SchedulerConfig;
pub use maintainer::WindowMaintainer;
pub use report::{MaintenanceReport, MaterializeOutcome, TemplateFailure};
pub use stats::RecurringSlotStats;
