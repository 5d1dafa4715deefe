//! Leveled logging facade over the suppression cache

use std::path::PathBuf;

use crate::cache::{LogAttempt, SuppressionCache};
use crate::error::Result;
use crate::options::{OptionArgs, Options};

use super::file_writer::{append_daily, timestamp};
use super::level::{log_label, LogLevel};

/// Per-call logging parameters
#[derive(Debug, Clone, Default)]
pub struct LogArgs {
    /// Prepended to the message as `"<caller> - "`
    pub caller: Option<String>,
    /// Dedup key; routes the message through the suppression cache
    pub key: Option<String>,
    /// Level label (default: ERROR with a key, WARNING without)
    pub label: Option<String>,
    /// Log file (default with a key: the configured default log; none without)
    pub log_file: Option<PathBuf>,
    /// Skip terminal output
    pub quiet: bool,
    /// Suppression window in seconds, only used with a key (default: one day)
    pub suppress_secs: Option<u64>,
}

impl LogArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn suppress_secs(mut self, secs: u64) -> Self {
        self.suppress_secs = Some(secs);
        self
    }
}

/// Logger with a minimum level
#[derive(Debug)]
pub struct Logger {
    cache: SuppressionCache,
    level: LogLevel,
}

impl Logger {
    /// Resolve options, load config and cache, and take the minimum level from `args`
    pub fn new(args: &OptionArgs) -> Result<Self> {
        let options = Options::new(args)?;
        let cache = SuppressionCache::load(options)?;
        let level = args
            .level
            .as_deref()
            .map(LogLevel::resolve)
            .unwrap_or_default();
        Ok(Self::with_cache(cache, level))
    }

    pub fn with_cache(cache: SuppressionCache, level: LogLevel) -> Self {
        Self { cache, level }
    }

    /// Minimum level that is logged
    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn cache(&self) -> &SuppressionCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SuppressionCache {
        &mut self.cache
    }

    /// Log a message regardless of the minimum level
    pub fn log(&mut self, message: &str, args: LogArgs) -> Result<()> {
        let message = match args.caller.as_deref() {
            Some(caller) if !caller.is_empty() => format!("{} - {}", caller, message),
            _ => message.to_string(),
        };

        if let Some(key) = args.key {
            let params = LogAttempt {
                label: args.label,
                log_file: args.log_file,
                suppress_secs: args.suppress_secs,
                quiet: args.quiet,
            };
            self.cache.log_attempt(&key, &message, &params)?;
            return Ok(());
        }

        let label = log_label(args.label.as_deref().unwrap_or(LogLevel::Warning.as_str()));
        if let Some(log_file) = &args.log_file {
            append_daily(log_file, label, &message, None)?;
        }
        if !args.quiet {
            self.cache
                .terminal()
                .write_line(&format!("{} {}: {}", timestamp(), label, message))?;
        }
        Ok(())
    }

    pub fn debug(&mut self, message: &str, args: LogArgs) -> Result<()> {
        self.log_at(LogLevel::Debug, message, args)
    }

    pub fn info(&mut self, message: &str, args: LogArgs) -> Result<()> {
        self.log_at(LogLevel::Info, message, args)
    }

    pub fn warning(&mut self, message: &str, args: LogArgs) -> Result<()> {
        self.log_at(LogLevel::Warning, message, args)
    }

    pub fn error(&mut self, message: &str, args: LogArgs) -> Result<()> {
        self.log_at(LogLevel::Error, message, args)
    }

    pub fn critical(&mut self, message: &str, args: LogArgs) -> Result<()> {
        self.log_at(LogLevel::Critical, message, args)
    }

    /// Log at `level`, labelled with that level, if it meets the minimum level
    pub fn log_at(&mut self, level: LogLevel, message: &str, args: LogArgs) -> Result<()> {
        if self.level > level {
            return Ok(());
        }
        self.log(message, args.label(level.as_str()))
    }
}
