//! Per-key suppression state

use serde::{Deserialize, Serialize};

/// Outcome of registering one occurrence of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Window has elapsed; the message goes to the terminal
    Visible,
    /// Shown recently; the message is muted
    Suppressed,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Persisted `(last_shown, suppressed_count)` pair for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Unix seconds of the last terminal display, 0 if never shown
    #[serde(rename = "shown", default)]
    pub last_shown: i64,

    /// Consecutive suppressed occurrences since `last_shown`
    #[serde(rename = "suppressed", default)]
    pub suppressed_count: u64,
}

impl CacheRecord {
    /// Register an occurrence at `now` against a window of `window_secs`
    ///
    /// The window is measured from the last display only; muted occurrences do not
    /// extend it.
    pub fn register(&mut self, now: i64, window_secs: u64) -> Visibility {
        let window = i64::try_from(window_secs).unwrap_or(i64::MAX);
        if now.saturating_sub(self.last_shown) > window {
            self.last_shown = now;
            self.suppressed_count = 0;
            Visibility::Visible
        } else {
            self.suppressed_count = self.suppressed_count.saturating_add(1);
            Visibility::Suppressed
        }
    }
}
