//! Detached emission worker
//!
//! Fire-and-forget log calls hand their composed line to a bounded queue
//! drained by a single worker thread. Sink errors on this path have no
//! caller to return to and are dropped. `flush` enqueues a rendezvous job
//! and waits for it, draining everything queued before it.

use crate::core::error::{LogError, Result};
use crate::core::sink::Sink;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Queue slots available before enqueueing blocks.
const QUEUE_CAPACITY: usize = 1024;

/// How long a dropped emitter waits for its worker to drain.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

enum Job {
    Write { sink: Arc<dyn Sink>, line: Vec<u8> },
    Flush { done: Sender<()> },
}

pub(crate) struct Emitter {
    sender: Option<Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Emitter {
    pub(crate) fn new() -> Emitter {
        let (sender, receiver) = bounded(QUEUE_CAPACITY);
        let handle = thread::spawn(move || Emitter::run(receiver));
        Emitter {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    fn run(jobs: Receiver<Job>) {
        while let Ok(job) = jobs.recv() {
            match job {
                Job::Write { sink, line } => {
                    // fire-and-forget: the error has nobody to go to
                    let _ = sink.write(&line);
                }
                Job::Flush { done } => {
                    let _ = done.send(());
                }
            }
        }
    }

    /// Queue one composed line. Blocks when the queue is full so that every
    /// admitted line is delivered.
    pub(crate) fn enqueue(&self, sink: Arc<dyn Sink>, line: Vec<u8>) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Job::Write { sink, line });
        }
    }

    /// Drain everything queued so far.
    pub(crate) fn flush(&self) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LogError::WorkerGone)?;
        let (done, ack) = bounded(1);
        sender
            .send(Job::Flush { done })
            .map_err(|_| LogError::WorkerGone)?;
        ack.recv().map_err(|_| LogError::WorkerGone)
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain pending jobs and exit.
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        eprintln!("[sitelog] emission worker panicked during shutdown");
                    }
                    break;
                }
                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[sitelog] emission worker did not finish within {:?}; some lines may be lost",
                        DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}
