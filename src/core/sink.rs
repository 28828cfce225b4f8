//! Sink trait for composed log lines

use std::io;

/// A destination for composed log lines.
///
/// Writes take `&self`: the sink alone is responsible for making concurrent
/// `write` calls safe and atomic. The logger performs one `write` per line
/// and adds no locking of its own. No buffering, flushing, or rotation
/// contract is imposed.
pub trait Sink: Send + Sync {
    fn write(&self, buf: &[u8]) -> io::Result<usize>;
}
