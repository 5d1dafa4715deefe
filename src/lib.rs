//! dailylog - timestamped daily log with rate-limited terminal echo
//!
//! Messages always land in a daily log file. Messages logged under a key reach the
//! terminal at most once per suppression window; repeats are counted in the log instead.

pub mod banner;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{AttemptOutcome, LogAttempt, SuppressionCache};
pub use config::Config;
pub use error::{DailyLogError, Result};
pub use logging::{log_label, log_level, LogArgs, LogLevel, Logger};
pub use options::{OptionArgs, Options};
