//! Suppression cache
//!
//! Remembers, per caller-supplied key, when a message was last shown on the terminal and
//! how many repeats have been muted since. Every mutation rewrites the cache file.

mod clock;
mod record;
mod store;

pub use clock::{Clock, SystemClock};
pub use record::{CacheRecord, Visibility};
pub use store::{CacheDocument, CacheStore, CURRENT_CACHE_VERSION};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::logging::{append_daily, Terminal};
use crate::options::Options;

/// Default suppression window: one day
pub const DEFAULT_SUPPRESS_SECS: u64 = 86_400;

/// Label used by `log_attempt` when none is given
pub const DEFAULT_LABEL: &str = "ERROR";

/// Result of one `attempt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    /// Whether the message should reach the terminal
    pub should_show: bool,
    /// Repeats muted since the last display, 0 when shown
    pub suppressed_count: u64,
}

/// Parameters for `SuppressionCache::log_attempt`
#[derive(Debug, Clone, Default)]
pub struct LogAttempt {
    /// Label written as given (default: ERROR)
    pub label: Option<String>,
    /// Log file (default: the configured default log)
    pub log_file: Option<PathBuf>,
    /// Suppression window in seconds (default: one day)
    pub suppress_secs: Option<u64>,
    /// Only append to the log file, bypassing the cache
    pub quiet: bool,
}

impl LogAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn suppress_secs(mut self, secs: u64) -> Self {
        self.suppress_secs = Some(secs);
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Persistent per-key rate limiter for terminal output
#[derive(Debug)]
pub struct SuppressionCache {
    config: Config,
    store: CacheStore,
    document: CacheDocument,
    clock: Box<dyn Clock>,
    terminal: Terminal,
}

impl SuppressionCache {
    /// Load (or create) the config and cache files named by `options`
    pub fn load(options: Options) -> Result<Self> {
        Self::with_parts(options, Box::new(SystemClock::new()), Terminal::stderr())
    }

    /// Like `load`, with an explicit clock and terminal
    pub fn with_parts(options: Options, clock: Box<dyn Clock>, terminal: Terminal) -> Result<Self> {
        let config = Config::load(options)?;
        let store = CacheStore::with_path(config.options().cache_path().clone());
        let document = store.load_or_create()?;

        Ok(Self {
            config,
            store,
            document,
            clock,
            terminal,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn options(&self) -> &Options {
        self.config.options()
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// Path of the default log file
    pub fn default_log(&self) -> PathBuf {
        self.config.default_log()
    }

    /// Validate `path` and make it the default log
    pub fn set_default_log(&mut self, path: &Path) -> Result<()> {
        self.config.set_default_log(path)
    }

    /// Stored record for `key`, if any
    pub fn record(&self, key: &str) -> Option<&CacheRecord> {
        self.document.entries.get(key)
    }

    pub fn entries(&self) -> &BTreeMap<String, CacheRecord> {
        &self.document.entries
    }

    /// Register an occurrence of `key` and decide whether it is shown
    ///
    /// The updated record is written back to the cache file before returning.
    pub fn attempt(&mut self, key: &str, suppress_secs: u64) -> Result<AttemptOutcome> {
        let mut record = self.record(key).copied().unwrap_or_default();
        let visibility = record.register(self.clock.now(), suppress_secs);

        let outcome = AttemptOutcome {
            should_show: visibility.is_visible(),
            suppressed_count: record.suppressed_count,
        };

        self.document.entries.insert(key.to_string(), record);
        self.store.save(&self.document)?;

        tracing::debug!(
            key,
            shown = outcome.should_show,
            suppressed = outcome.suppressed_count,
            "Suppression attempt"
        );
        Ok(outcome)
    }

    /// Log `message` under `key`, muting terminal repeats inside the window
    ///
    /// The log file always gets a line. Returns true if the message was shown on the
    /// terminal or, in quiet mode, written to the log.
    pub fn log_attempt(&mut self, key: &str, message: &str, params: &LogAttempt) -> Result<bool> {
        let label = params.label.as_deref().unwrap_or(DEFAULT_LABEL);
        let log_path = params
            .log_file
            .clone()
            .unwrap_or_else(|| self.default_log());

        if params.quiet {
            append_daily(&log_path, label, message, None)?;
            return Ok(true);
        }

        let outcome = self.attempt(key, params.suppress_secs.unwrap_or(DEFAULT_SUPPRESS_SECS))?;
        if outcome.should_show {
            self.terminal.write_line(&format!("{}: {}", label, message))?;
        }

        let annotation = (outcome.suppressed_count > 0).then_some(outcome.suppressed_count);
        append_daily(&log_path, label, message, annotation)?;

        Ok(outcome.should_show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DailyLogError;
    use crate::options::OptionArgs;
    use crate::test_support::{capture_terminal, count_in_file, CapturedOutput, MockClock};
    use std::fs;
    use tempfile::TempDir;

    const CACHE_KEY: &str = "test";
    const MESSAGE: &str = "Do not eat yellow snow.";
    const START: i64 = 1_700_000_000;

    struct Fixture {
        temp_dir: TempDir,
        clock: MockClock,
        output: CapturedOutput,
        cache: SuppressionCache,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let clock = MockClock::new(START);
            let (cache, output) = open_cache(&temp_dir, &clock);
            Self {
                temp_dir,
                clock,
                output,
                cache,
            }
        }

        fn log_path(&self) -> PathBuf {
            self.temp_dir.path().join("daily.log")
        }
    }

    fn test_options(temp_dir: &TempDir) -> Options {
        let args = OptionArgs::with_paths(
            temp_dir.path().join("cache").join("daily.cache").to_string_lossy(),
            temp_dir.path().join("daily.config").to_string_lossy(),
        );
        Options::new(&args).unwrap()
    }

    fn open_cache(temp_dir: &TempDir, clock: &MockClock) -> (SuppressionCache, CapturedOutput) {
        let (terminal, output) = capture_terminal();
        let cache =
            SuppressionCache::with_parts(test_options(temp_dir), Box::new(clock.clone()), terminal)
                .unwrap();
        (cache, output)
    }

    #[test]
    fn test_creation_writes_both_documents() {
        let fixture = Fixture::new();
        let options = fixture.cache.options();
        assert!(options.cache_path().is_file());
        assert!(options.config_path().is_file());
        assert!(fixture.cache.entries().is_empty());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(options.cache_path()).unwrap()).unwrap();
        assert_eq!(raw["version"], CURRENT_CACHE_VERSION);
    }

    #[test]
    fn test_first_attempt_is_shown() {
        let mut fixture = Fixture::new();
        let outcome = fixture.cache.attempt(CACHE_KEY, DEFAULT_SUPPRESS_SECS).unwrap();
        assert_eq!(
            outcome,
            AttemptOutcome {
                should_show: true,
                suppressed_count: 0
            }
        );
        assert_eq!(fixture.cache.record(CACHE_KEY).unwrap().last_shown, START);
    }

    #[test]
    fn test_attempt_sequence() {
        let mut fixture = Fixture::new();
        let window = 100;

        assert!(fixture.cache.attempt(CACHE_KEY, window).unwrap().should_show);

        fixture.clock.advance(50);
        let outcome = fixture.cache.attempt(CACHE_KEY, window).unwrap();
        assert!(!outcome.should_show);
        assert_eq!(outcome.suppressed_count, 1);

        fixture.clock.advance(50);
        let outcome = fixture.cache.attempt(CACHE_KEY, window).unwrap();
        assert!(!outcome.should_show);
        assert_eq!(outcome.suppressed_count, 2);

        // 101s after the last display
        fixture.clock.advance(1);
        let outcome = fixture.cache.attempt(CACHE_KEY, window).unwrap();
        assert!(outcome.should_show);
        assert_eq!(outcome.suppressed_count, 0);

        fixture.clock.advance(100);
        assert!(!fixture.cache.attempt(CACHE_KEY, window).unwrap().should_show);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut fixture = Fixture::new();
        assert!(fixture.cache.attempt("disk", 60).unwrap().should_show);
        assert!(fixture.cache.attempt("backup", 60).unwrap().should_show);
        assert!(!fixture.cache.attempt("disk", 60).unwrap().should_show);
        assert_eq!(fixture.cache.entries().len(), 2);
    }

    #[test]
    fn test_zero_window_shows_every_second() {
        let mut fixture = Fixture::new();
        for _ in 0..3 {
            assert!(fixture.cache.attempt(CACHE_KEY, 0).unwrap().should_show);
            fixture.clock.advance(1);
        }
    }

    #[test]
    fn test_attempt_persists_between_instances() {
        let temp_dir = TempDir::new().unwrap();
        let clock = MockClock::new(START);

        let (mut first, _) = open_cache(&temp_dir, &clock);
        assert!(first.attempt(CACHE_KEY, 60).unwrap().should_show);

        clock.advance(10);
        let (mut second, _) = open_cache(&temp_dir, &clock);
        assert_eq!(second.record(CACHE_KEY).unwrap().last_shown, START);
        let outcome = second.attempt(CACHE_KEY, 60).unwrap();
        assert!(!outcome.should_show);
        assert_eq!(outcome.suppressed_count, 1);

        let (third, _) = open_cache(&temp_dir, &clock);
        assert_eq!(
            third.record(CACHE_KEY),
            Some(&CacheRecord {
                last_shown: START,
                suppressed_count: 1
            })
        );
    }

    #[test]
    fn test_log_attempt_repeats_within_window() {
        let mut fixture = Fixture::new();
        let log_path = fixture.log_path();

        for label in ["DEBUG", "WARNING", "INFO"] {
            let params = LogAttempt::new().log_file(&log_path).label(label);
            fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap();
        }

        assert_eq!(fixture.output.count(MESSAGE), 1);
        assert_eq!(fixture.output.contents(), format!("DEBUG: {}\n", MESSAGE));
        assert_eq!(count_in_file(&log_path, MESSAGE), 3);

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert!(lines[0].ends_with(&format!("DEBUG: {}", MESSAGE)));
        assert!(lines[1].ends_with(&format!("WARNING: {} [1]", MESSAGE)));
        assert!(lines[2].ends_with(&format!("INFO: {} [2]", MESSAGE)));
    }

    #[test]
    fn test_log_attempt_returns_shown() {
        let mut fixture = Fixture::new();
        let params = LogAttempt::new().log_file(fixture.log_path());

        assert!(fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap());
        assert!(!fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap());
    }

    #[test]
    fn test_log_attempt_quiet() {
        let mut fixture = Fixture::new();
        let log_path = fixture.log_path();

        for label in ["DEBUG", "WARNING", "INFO"] {
            let params = LogAttempt::new()
                .log_file(&log_path)
                .label(label)
                .quiet(true);
            assert!(fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap());
        }

        assert_eq!(fixture.output.count(MESSAGE), 0);
        assert_eq!(count_in_file(&log_path, MESSAGE), 3);
        assert_eq!(count_in_file(&log_path, "["), 0);
        assert!(fixture.cache.record(CACHE_KEY).is_none());

        let raw: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(fixture.cache.options().cache_path()).unwrap(),
        )
        .unwrap();
        assert!(raw["entries"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_log_attempt_shows_again_after_window() {
        let mut fixture = Fixture::new();
        let params = LogAttempt::new()
            .log_file(fixture.log_path())
            .suppress_secs(60);

        fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap();
        fixture.clock.advance(30);
        fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap();
        fixture.clock.advance(31);
        fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap();

        assert_eq!(fixture.output.count(MESSAGE), 2);
        assert_eq!(count_in_file(&fixture.log_path(), MESSAGE), 3);
        assert_eq!(count_in_file(&fixture.log_path(), "[1]"), 1);
    }

    #[test]
    fn test_log_attempt_default_label_and_log() {
        let mut fixture = Fixture::new();
        let log_path = fixture.log_path();
        fixture.cache.set_default_log(&log_path).unwrap();

        fixture
            .cache
            .log_attempt(CACHE_KEY, MESSAGE, &LogAttempt::new())
            .unwrap();

        assert_eq!(fixture.output.contents(), format!("ERROR: {}\n", MESSAGE));
        assert_eq!(count_in_file(&log_path, &format!("ERROR: {}", MESSAGE)), 1);
    }

    #[test]
    fn test_log_attempt_keeps_custom_label() {
        let mut fixture = Fixture::new();
        let log_path = fixture.log_path();
        let params = LogAttempt::new().log_file(&log_path).label("NIGHTLY");

        fixture.cache.log_attempt(CACHE_KEY, MESSAGE, &params).unwrap();

        assert_eq!(fixture.output.contents(), format!("NIGHTLY: {}\n", MESSAGE));
        assert_eq!(count_in_file(&log_path, &format!("NIGHTLY: {}", MESSAGE)), 1);
        assert_eq!(count_in_file(&log_path, "WARNING"), 0);
    }

    #[test]
    fn test_set_default_log_validates() {
        let mut fixture = Fixture::new();
        let missing = fixture.temp_dir.path().join("var").join("log").join("daily.log");

        let err = fixture.cache.set_default_log(&missing).unwrap_err();
        assert!(matches!(err, DailyLogError::DirectoryNotFound(_)));
        assert_ne!(fixture.cache.default_log(), missing);
    }

    #[test]
    fn test_log_attempt_missing_log_directory() {
        let mut fixture = Fixture::new();
        let params =
            LogAttempt::new().log_file(fixture.temp_dir.path().join("missing").join("daily.log"));

        let err = fixture
            .cache
            .log_attempt(CACHE_KEY, MESSAGE, &params)
            .unwrap_err();
        assert!(matches!(err, DailyLogError::Io(_)));
    }

    #[test]
    fn test_unsupported_cache_version() {
        let temp_dir = TempDir::new().unwrap();
        let options = test_options(&temp_dir);
        fs::create_dir_all(options.cache_path().parent().unwrap()).unwrap();
        fs::write(options.cache_path(), r#"{"version": 2, "entries": {}}"#).unwrap();

        let err = SuppressionCache::load(options).unwrap_err();
        assert!(matches!(
            err,
            DailyLogError::UnsupportedVersion { found: 2, .. }
        ));
    }
}
