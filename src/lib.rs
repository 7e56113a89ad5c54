// In-process log capture with listener fan-out
//
// A Logger formats each call once into a shared LogEntry, mirrors the raw
// call to a system sink (console/serial), and hands the same entry to every
// registered listener. With no listener registered, an optional size-capped
// fallback buffer accumulates the text until someone drains it.

mod buffer;
mod consumer;
mod entry;
mod error;
mod listener;
mod logger;
#[macro_use]
mod macros;
mod severity;
mod sink;

// Public exports
pub use buffer::{BoundedBuffer, DEFAULT_BUFFER_CAPACITY, TRUNCATION_MARKER};
pub use consumer::{QueueConsumer, QueuedListener};
pub use entry::{LogEntry, SharedEntry};
pub use error::LogError;
pub use listener::{ListenerHandle, ListenerRegistry, LogListener};
pub use logger::{global, init, log_timestamp, Logger};
pub use severity::Severity;
pub use sink::{JsonSink, StderrSink, StdoutSink, SystemSink};
