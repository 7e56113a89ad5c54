// Queued listener: decouples slow consumers from the producers' lock

use crate::entry::SharedEntry;
use crate::listener::LogListener;
use crate::sink::SystemSink;
use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Listener that parks entries on a bounded queue instead of processing them
/// inside the notification callback.
///
/// The synchronous contract holds every producer on the registry lock while a
/// listener callback runs. A consumer that can block (a web session writer, a
/// file appender) should register a `QueuedListener` and drain it from its
/// own thread; the callback then costs one queue push. Entries pushed while
/// the queue is full are dropped and counted, never blocking the producer.
pub struct QueuedListener {
    queue: ArrayQueue<SharedEntry>,
    dropped: AtomicU64,
}

impl QueuedListener {
    /// Create a listener with room for `capacity` pending entries.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            queue: ArrayQueue::new(capacity),
            dropped: AtomicU64::new(0),
        })
    }

    /// Pop the oldest pending entry.
    pub fn pop(&self) -> Option<SharedEntry> {
        self.queue.pop()
    }

    /// Number of entries dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of entries waiting to be drained.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl LogListener for QueuedListener {
    fn on_log_entry(&self, entry: &SharedEntry) {
        if self.queue.push(Arc::clone(entry)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Drains a [`QueuedListener`] into a sink from a dedicated thread.
pub struct QueueConsumer {
    listener: Arc<QueuedListener>,
    sink: Box<dyn SystemSink>,
    running: Arc<AtomicBool>,
}

impl QueueConsumer {
    pub fn new(listener: Arc<QueuedListener>, sink: Box<dyn SystemSink>) -> Self {
        Self {
            listener,
            sink,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Get a handle to stop the consumer loop.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Run the drain loop until stopped, then drain whatever is left.
    pub fn run(self) {
        while self.running.load(Ordering::Relaxed) {
            if !self.drain_once() {
                // No data available, sleep briefly
                std::thread::sleep(Duration::from_millis(1));
            }
        }

        // Final drain
        self.drain_once();
    }

    fn drain_once(&self) -> bool {
        let mut any_read = false;
        while let Some(entry) = self.listener.pop() {
            let _ = self.sink.write_log(format_args!("{}", entry.text()));
            any_read = true;
        }
        any_read
    }
}
