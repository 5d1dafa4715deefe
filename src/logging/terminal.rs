//! Terminal sink for visible messages

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable line writer for terminal output, stderr unless redirected
#[derive(Clone)]
pub struct Terminal {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Terminal {
    /// Terminal writing to the process's stderr
    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    /// Terminal writing to an arbitrary writer
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write one line and flush
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "terminal writer lock poisoned"))?;
        writeln!(sink, "{}", line)?;
        sink.flush()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal").finish_non_exhaustive()
    }
}
