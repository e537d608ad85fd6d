//! Log routing. While the desktop owns the terminal nothing may be written
//! to stderr, so events go either to a log file or to a bounded in-memory
//! buffer that `main` prints once the terminal has been restored.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

const MAX_BUFFERED_LINES: usize = 500;

/// Most recent log lines, oldest first.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?;
        for line in text.lines().filter(|l| !l.is_empty()) {
            if lines.len() == MAX_BUFFERED_LINES {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
        Ok(())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Write everything collected so far to `out` and empty the buffer.
    pub fn drain_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let drained: Vec<String> = match self.lines.lock() {
            Ok(mut lines) => lines.drain(..).collect(),
            Err(_) => return Ok(()),
        };
        for line in drained {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

#[derive(Debug, Clone)]
enum LogTarget {
    File(Arc<Mutex<File>>),
    Buffer(LogBuffer),
}

pub struct DelegatingWriter {
    target: LogTarget,
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.target {
            LogTarget::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file poisoned"))?
                .write(buf),
            LogTarget::Buffer(buffer) => {
                buffer.append(buf)?;
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.target {
            LogTarget::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file poisoned"))?
                .flush(),
            LogTarget::Buffer(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberMakeWriter {
    target: LogTarget,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter {
            target: self.target.clone(),
        }
    }
}

/// Install the global subscriber at `level`. Logs are appended to
/// `log_file` when given; otherwise they are kept in the returned buffer.
/// Calling it again leaves the first subscriber in place.
pub fn init(level: Level, log_file: Option<&Path>) -> io::Result<Option<LogBuffer>> {
    let (target, buffer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (LogTarget::File(Arc::new(Mutex::new(file))), None)
        }
        None => {
            let buffer = LogBuffer::new();
            (LogTarget::Buffer(buffer.clone()), Some(buffer))
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter { target })
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(buffer)
}
