//! File sink

use crate::core::sink::Sink;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Appends lines to a file. Opened in append mode so concurrent writers on
/// the same descriptor stay line-atomic at the OS level.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open (creating if needed) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<FileSink> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink { file })
    }
}

impl Sink for FileSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut handle = &self.file;
        handle.write_all(buf)?;
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.log");
        let sink = FileSink::open(&path).expect("open sink");
        sink.write(b"first\n").unwrap();
        sink.write(b"second\n").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
