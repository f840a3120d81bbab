//! # Scheduler Configuration
//!
//! Settings for the rolling-window maintenance job, read from the
//! environment.
//!
//! ## Environment Variables
//!
//! - `SCHEDULER_HORIZON_DAYS`: days of future coverage to keep (default: 7)
//! - `SCHEDULER_NOTES_IN_TEMPLATE_KEY`: whether slots differing only in notes
//!   are separate templates (default: false)
//! - `SCHEDULER_RUN_TIMEOUT_SECONDS`: upper bound for one run (default: 120)

use eyre::{ensure, Result, WrapErr};
use recurslot_core::models::NotesPolicy;
use std::{env, time::Duration};

pub const DEFAULT_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_RUN_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Days ahead of now that every active template must be covered for
    pub horizon_days: u32,

    /// Whether `notes` is part of template identity
    pub notes_policy: NotesPolicy,

    /// Overall timeout for a single maintenance run, in seconds
    pub run_timeout_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            notes_policy: NotesPolicy::Ignore,
            run_timeout_seconds: DEFAULT_RUN_TIMEOUT_SECONDS,
        }
    }
}

impl SchedulerConfig {
    /// Creates a new SchedulerConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// horizon or timeout is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`SchedulerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let horizon_days: u32 = lookup("SCHEDULER_HORIZON_DAYS")
            .unwrap_or_else(|| DEFAULT_HORIZON_DAYS.to_string())
            .trim()
            .parse()
            .wrap_err("Invalid SCHEDULER_HORIZON_DAYS value")?;
        ensure!(horizon_days >= 1, "SCHEDULER_HORIZON_DAYS must be at least 1");

        let notes_policy = match lookup("SCHEDULER_NOTES_IN_TEMPLATE_KEY")
            .unwrap_or_else(|| "false".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "true" | "1" | "yes" => NotesPolicy::Distinguish,
            "false" | "0" | "no" | "" => NotesPolicy::Ignore,
            other => eyre::bail!("Invalid SCHEDULER_NOTES_IN_TEMPLATE_KEY value: {}", other),
        };

        let run_timeout_seconds: u64 = lookup("SCHEDULER_RUN_TIMEOUT_SECONDS")
            .unwrap_or_else(|| DEFAULT_RUN_TIMEOUT_SECONDS.to_string())
            .trim()
            .parse()
            .wrap_err("Invalid SCHEDULER_RUN_TIMEOUT_SECONDS value")?;
        ensure!(
            run_timeout_seconds >= 1,
            "SCHEDULER_RUN_TIMEOUT_SECONDS must be at least 1"
        );

        Ok(Self {
            horizon_days,
            notes_policy,
            run_timeout_seconds,
        })
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_seconds)
    }
}
