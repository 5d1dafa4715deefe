//! Configuration management for dailylog
//!
//! The config document is a small YAML file holding the schema version and the default
//! log file. It is created on first use and rewritten in full on every change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DailyLogError, Result};
use crate::options::Options;

/// Schema version written to and expected from the config file
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Categories of disk errors for user-friendly messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied (read or write)
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Other IO error
    Other,
}

impl DiskErrorKind {
    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            DiskErrorKind::DiskFull => "Disk full - free space needed to write the log",
            DiskErrorKind::PermissionDenied => "Permission denied",
            DiskErrorKind::NotFound => "File or directory not found",
            DiskErrorKind::Other => "Failed to write log data",
        }
    }
}

/// Categorize an IO error into a user-friendly category
pub fn categorize_io_error(e: &std::io::Error) -> DiskErrorKind {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::WriteZero => DiskErrorKind::DiskFull,
        ErrorKind::PermissionDenied => DiskErrorKind::PermissionDenied,
        ErrorKind::NotFound => DiskErrorKind::NotFound,

        // Check raw OS error for disk full on Unix
        _ => {
            #[cfg(unix)]
            {
                if let Some(os_error) = e.raw_os_error() {
                    // ENOSPC = 28, EDQUOT = 122 on Linux / 69 on macOS
                    if os_error == libc::ENOSPC || os_error == libc::EDQUOT {
                        return DiskErrorKind::DiskFull;
                    }
                    if os_error == libc::EACCES {
                        return DiskErrorKind::PermissionDenied;
                    }
                }
            }
            DiskErrorKind::Other
        }
    }
}

/// Create a user-friendly error message from an IO error
pub fn friendly_io_error_message(e: &std::io::Error, context: &str) -> String {
    let kind = categorize_io_error(e);
    match kind {
        DiskErrorKind::DiskFull | DiskErrorKind::PermissionDenied => {
            format!("{}: {}", context, kind.user_message())
        }
        DiskErrorKind::NotFound => format!("{}: file or directory not found", context),
        DiskErrorKind::Other => format!("{}: {}", context, e),
    }
}

/// Persisted configuration document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Schema version; a missing field reads as 0
    #[serde(default)]
    pub version: u32,

    /// Log file used when a caller does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_log: Option<PathBuf>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            default_log: Some(default_log_path()),
        }
    }
}

/// Bring an older config document up to the current version
///
/// Only the current version is known, so anything else is rejected.
pub fn migrate(document: ConfigDocument) -> Result<ConfigDocument> {
    if document.version != CURRENT_CONFIG_VERSION {
        return Err(DailyLogError::UnsupportedVersion {
            document: "config",
            found: document.version,
            expected: CURRENT_CONFIG_VERSION,
        });
    }
    Ok(document)
}

/// Application configuration bound to its file
#[derive(Debug, Clone)]
pub struct Config {
    options: Options,
    document: ConfigDocument,
}

impl Config {
    /// Load the config file, creating it with defaults if it does not exist
    pub fn load(options: Options) -> Result<Self> {
        let path = options.config_path();
        if path.is_file() {
            let content = fs::read_to_string(path)?;
            let document: ConfigDocument =
                serde_yaml::from_str(&content).map_err(|source| DailyLogError::ConfigParse {
                    path: path.clone(),
                    source,
                })?;
            let document = migrate(document)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(Self { options, document })
        } else {
            let config = Self {
                options,
                document: ConfigDocument::default(),
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Path of the default log file
    pub fn default_log(&self) -> PathBuf {
        self.document
            .default_log
            .clone()
            .unwrap_or_else(default_log_path)
    }

    /// Point the default log at `path` and persist the change
    pub fn set_default_log(&mut self, path: &Path) -> Result<()> {
        if !path.is_absolute() {
            return Err(DailyLogError::InvalidArgument(format!(
                "log path name must be absolute: {}",
                path.display()
            )));
        }
        validate_path(path)?;
        self.document.default_log = Some(path.to_path_buf());
        self.save()
    }

    /// Rewrite the whole config file
    pub fn save(&self) -> Result<()> {
        let path = self.options.config_path();
        if self.options.is_debug() {
            tracing::debug!("Saving configuration to file: {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self.document)?;
        fs::write(path, content)?;

        Ok(())
    }
}

/// Default log file (~/daily.log)
/// Falls back to ./daily.log if home directory cannot be determined
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join("daily.log"))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using current directory for log");
            PathBuf::from("daily.log")
        })
}

/// Check that `path` is a file we can append to, or one we could create
pub fn validate_path(path: &Path) -> Result<()> {
    if path.exists() {
        return validate_existing_path(path);
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(DailyLogError::DirectoryNotFound(parent.to_path_buf()));
    }
    if !is_writable(parent) {
        return Err(DailyLogError::NotWritable(parent.to_path_buf()));
    }
    Ok(())
}

fn validate_existing_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DailyLogError::NotAFile(path.to_path_buf()));
    }
    if !is_writable(path) {
        return Err(DailyLogError::NotWritable(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    match CString::new(path.as_os_str().as_bytes()) {
        Ok(c_path) => unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 },
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
