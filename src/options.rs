//! Process options and file locations
//!
//! Resolves where the cache and config documents live. Paths that are not supplied fall
//! back to the user's home directory; whatever is used must end up absolute.

use std::path::PathBuf;

use crate::error::{DailyLogError, Result};

/// Name used for the default cache and config file names
pub const APP_NAME: &str = "dailylog";

/// Raw constructor arguments, all optional
#[derive(Debug, Clone, Default)]
pub struct OptionArgs {
    /// Cache file path (default: ~/.cache/dailylog.json)
    pub cache: Option<String>,
    /// Config file path (default: ~/.config/dailylog.yaml)
    pub config: Option<String>,
    /// Debug level (default: 0)
    pub debug: u8,
    /// Verbosity level (default: 0)
    pub verbose: u8,
    /// Test mode flag (default: false)
    pub test: bool,
    /// Minimum log level, as a name or a number (default: WARNING)
    pub level: Option<String>,
}

impl OptionArgs {
    /// Arguments pointing the cache and config documents at explicit files
    pub fn with_paths(cache: impl Into<String>, config: impl Into<String>) -> Self {
        Self {
            cache: Some(cache.into()),
            config: Some(config.into()),
            ..Self::default()
        }
    }
}

/// Validated options, immutable once built
#[derive(Debug, Clone)]
pub struct Options {
    cache_path: PathBuf,
    config_path: PathBuf,
    debug: u8,
    verbose: u8,
    test: bool,
}

impl Options {
    /// Resolve and validate the file locations in `args`
    pub fn new(args: &OptionArgs) -> Result<Self> {
        Ok(Self {
            cache_path: resolve_path("cache", args.cache.as_deref(), default_cache_path())?,
            config_path: resolve_path("config", args.config.as_deref(), default_config_path())?,
            debug: args.debug,
            verbose: args.verbose,
            test: args.test,
        })
    }

    pub fn cache_path(&self) -> &PathBuf {
        &self.cache_path
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn debug_level(&self) -> u8 {
        self.debug
    }

    pub fn verbose_level(&self) -> u8 {
        self.verbose
    }

    /// True if the debug level is greater than 0
    pub fn is_debug(&self) -> bool {
        self.debug > 0
    }

    /// True if the verbosity level is greater than 0
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    pub fn is_test(&self) -> bool {
        self.test
    }
}

/// Default cache file (~/.cache/dailylog.json), None if home directory is unavailable
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cache").join(format!("{}.json", APP_NAME)))
}

/// Default config file (~/.config/dailylog.yaml), None if home directory is unavailable
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join(format!("{}.yaml", APP_NAME)))
}

/// Expand a leading `~` to the home directory
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn resolve_path(file_key: &str, supplied: Option<&str>, fallback: Option<PathBuf>) -> Result<PathBuf> {
    let path = match supplied.filter(|s| !s.is_empty()) {
        Some(raw) => expand_path(raw),
        None => fallback.unwrap_or_default(),
    };

    if path.as_os_str().is_empty() {
        return Err(DailyLogError::InvalidArgument(format!(
            "{} path name cannot be empty",
            file_key
        )));
    }
    if !path.is_absolute() {
        return Err(DailyLogError::InvalidArgument(format!(
            "{} path name must be absolute: {}",
            file_key,
            path.display()
        )));
    }

    Ok(path)
}
