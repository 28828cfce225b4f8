//! Console sink

use crate::core::sink::Sink;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes lines to the process's standard output or standard error. The
/// stream lock makes each line write atomic across threads.
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> ConsoleSink {
        ConsoleSink {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> ConsoleSink {
        ConsoleSink {
            stream: Stream::Stderr,
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf)?,
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }
}
