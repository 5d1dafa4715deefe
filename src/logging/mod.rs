//! Logging for dailylog
//!
//! Level mapping, the daily log appender, the terminal sink and the leveled `Logger`
//! facade, plus the tracing setup used for the crate's own diagnostics.

mod diagnostics;
mod file_writer;
mod level;
mod logger;
mod terminal;

pub use diagnostics::{default_filter, init_diagnostics};
pub use file_writer::{append_daily, format_line, timestamp, TIMESTAMP_FORMAT};
pub use level::{log_label, log_level, LogLevel, LOG_LEVELS};
pub use logger::{LogArgs, Logger};
pub use terminal::Terminal;
