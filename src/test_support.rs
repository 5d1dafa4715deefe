//! Shared helpers for unit tests

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use crate::cache::Clock;
use crate::logging::Terminal;

/// In-memory writer whose contents stay readable after it is handed out
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().expect("captured output lock poisoned");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Number of times `needle` occurs in the captured output
    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().expect("captured output lock poisoned");
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A terminal writing into a capture buffer
pub fn capture_terminal() -> (Terminal, CapturedOutput) {
    let output = CapturedOutput::default();
    (Terminal::from_writer(output.clone()), output)
}

/// Number of times `needle` occurs in the file at `path`, 0 if it does not exist
pub fn count_in_file(path: &Path, needle: &str) -> usize {
    fs::read_to_string(path)
        .map(|content| content.matches(needle).count())
        .unwrap_or(0)
}

/// Clock whose time only moves when a test moves it
///
/// Clones share the same time.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<AtomicI64>,
}

impl MockClock {
    pub fn new(start: i64) -> Self {
        Self {
            current_time: Arc::new(AtomicI64::new(start)),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.current_time.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, now: i64) {
        self.current_time.store(now, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> i64 {
        self.current_time.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock() {
        let clock = MockClock::new(1_000);
        assert_eq!(clock.now(), 1_000);

        clock.clone().advance(10);
        assert_eq!(clock.now(), 1_010);

        clock.set(5_000);
        assert_eq!(clock.now(), 5_000);
    }
}
