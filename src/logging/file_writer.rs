//! Daily log file appender
//!
//! Each call opens the log in append mode, writes one line and closes it again.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::Result;

/// Local timestamp format used at the start of every log line
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %p %Z %Y";

/// Current local time, formatted for a log line
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Format a log line (without the trailing newline)
///
/// A suppressed count adds a ` [n]` suffix.
pub fn format_line(stamp: &str, label: &str, message: &str, suppressed: Option<u64>) -> String {
    match suppressed {
        Some(count) => format!("{} {}: {} [{}]", stamp, label, message, count),
        None => format!("{} {}: {}", stamp, label, message),
    }
}

/// Append one timestamped line to the log at `log_path`
pub fn append_daily(
    log_path: &Path,
    label: &str,
    message: &str,
    suppressed: Option<u64>,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let line = format_line(&timestamp(), label, message, suppressed);
    writeln!(file, "{}", line)?;
    Ok(())
}
