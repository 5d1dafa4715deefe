//! Canonical severity levels
//!
//! Levels carry the conventional numeric values (DEBUG = 10 up to CRITICAL = 50) so they
//! can be given either by name or by number.

use std::fmt;

/// Log severity, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 10,
    Info = 20,
    #[default]
    Warning = 30,
    Error = 40,
    Critical = 50,
}

/// All levels, ascending severity
pub const LOG_LEVELS: [LogLevel; 5] = [
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warning,
    LogLevel::Error,
    LogLevel::Critical,
];

impl LogLevel {
    /// Get the canonical name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Get the numeric value for this level
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u64) -> Option<Self> {
        LOG_LEVELS.into_iter().find(|l| u64::from(l.value()) == value)
    }

    /// Look up a level by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        LOG_LEVELS
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(name))
    }

    /// Resolve a level given as a name or a decimal number
    ///
    /// Anything unrecognised resolves to `Warning`.
    pub fn resolve(input: &str) -> Self {
        let found = if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            input.parse::<u64>().ok().and_then(Self::from_value)
        } else {
            Self::from_name(input)
        };
        found.unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric level for a level name or number, WARNING's value if unrecognised
pub fn log_level(input: &str) -> u8 {
    LogLevel::resolve(input).value()
}

/// Level name for a level name or number, "WARNING" if unrecognised
pub fn log_label(input: &str) -> &'static str {
    LogLevel::resolve(input).as_str()
}
