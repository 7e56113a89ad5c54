// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logger core: formats once, mirrors to the system sink, fans out to listeners

use crate::buffer::BoundedBuffer;
use crate::entry::LogEntry;
use crate::error::LogError;
use crate::listener::{ListenerHandle, ListenerRegistry};
use crate::severity::Severity;
use crate::sink::{StdoutSink, SystemSink};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Log entry point: mirrors each call to a system sink and fans the
/// formatted result out to every registered listener.
///
/// A `Logger` is an explicitly constructed instance, shared by reference
/// among producer threads (`Logger` is `Send + Sync`; all operations take
/// `&self`). For call sites that cannot carry a reference, [`init`] installs
/// one instance as the process-wide logger reachable through [`global`].
///
/// Each `log` call expands its format arguments at most twice: once in the
/// sink (which sees the raw arguments, like a vprintf hook) and once into
/// the single [`LogEntry`](crate::LogEntry) shared by all listeners. With no
/// listener registered, no entry is constructed at all.
pub struct Logger {
    registry: ListenerRegistry,
    sink: Option<Box<dyn SystemSink>>,
    fallback: Option<BoundedBuffer>,
    min_level: AtomicU8,
}

impl Logger {
    /// Logger mirroring every call to stdout, with no fallback buffer.
    pub fn new() -> Self {
        Self::with_sink(Box::new(StdoutSink))
    }

    /// Logger mirroring every call to `sink`.
    pub fn with_sink(sink: Box<dyn SystemSink>) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            sink: Some(sink),
            fallback: None,
            min_level: AtomicU8::new(Severity::Info.as_u8()),
        }
    }

    /// Logger with no system output. Entries only reach listeners, and the
    /// fallback buffer when one is configured.
    pub fn without_sink() -> Self {
        Self {
            registry: ListenerRegistry::new(),
            sink: None,
            fallback: None,
            min_level: AtomicU8::new(Severity::Info.as_u8()),
        }
    }

    /// Attach a size-capped fallback buffer that accumulates the formatted
    /// text of every call made while no listener is registered. Read it back
    /// with [`drain_fallback`](Logger::drain_fallback).
    pub fn with_fallback(mut self, capacity: usize) -> Self {
        self.fallback = Some(BoundedBuffer::new(capacity));
        self
    }

    /// Format and deliver one log line.
    ///
    /// The raw arguments go to the system sink first (when one is
    /// configured); the formatted result is then fanned out to listeners via
    /// [`notify_listeners`](Logger::notify_listeners). Listener notification
    /// is attempted even when the sink fails, but a failure on either path
    /// turns the aggregate result into an `Err`.
    ///
    /// On success the returned count favors the listener entry's length when
    /// listeners were notified, then the sink's count, then the number of
    /// bytes appended to the fallback buffer.
    pub fn log(&self, args: fmt::Arguments<'_>) -> Result<usize, LogError> {
        let sink_result = self.sink.as_ref().map(|sink| sink.write_log(args));

        let listener_count = self.notify_listeners(args)?;

        let mut fallback_count = 0;
        if listener_count == 0 {
            if let Some(buffer) = &self.fallback {
                let text = fmt::format(args);
                fallback_count = text.len();
                buffer.write(&text);
            }
        }

        let sink_count = sink_result.transpose()?.unwrap_or(0);

        if listener_count > 0 {
            Ok(listener_count)
        } else if sink_count > 0 {
            Ok(sink_count)
        } else {
            Ok(fallback_count)
        }
    }

    /// Fan a single formatted entry out to every registered listener.
    ///
    /// With no listener registered this is a no-op returning `Ok(0)`; the
    /// arguments are not expanded and no entry is constructed. Otherwise the
    /// arguments are expanded exactly once and every listener receives a
    /// handle to that same entry, under the registry lock. Returns the
    /// entry's length in bytes.
    pub fn notify_listeners(&self, args: fmt::Arguments<'_>) -> Result<usize, LogError> {
        self.registry.dispatch(|| LogEntry::format(args))
    }

    /// Register `listener` for all subsequent log calls.
    pub fn add_listener(&self, listener: ListenerHandle) {
        self.registry.add(listener);
    }

    /// Unregister `listener`. Once this returns, the listener receives no
    /// notification from any log call that begins afterwards. Returns
    /// `false` when the handle was not registered.
    pub fn remove_listener(&self, listener: &ListenerHandle) -> bool {
        self.registry.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    /// Severity gate used by the call-site macros. `log` itself never
    /// interprets severity.
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.as_u8() <= self.min_level.load(Ordering::Relaxed)
    }

    /// Set the most verbose severity the macros still emit.
    pub fn set_min_level(&self, level: Severity) {
        self.min_level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn min_level(&self) -> Severity {
        Severity::from_u8(self.min_level.load(Ordering::Relaxed)).unwrap_or(Severity::Debug)
    }

    /// Take everything the fallback buffer accumulated since the last drain.
    /// `None` when no fallback buffer is configured or nothing was written.
    pub fn drain_fallback(&self) -> Option<String> {
        self.fallback.as_ref()?.drain_and_reset()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Install `logger` as the process-wide instance.
///
/// Call once during startup, before anything uses [`global`]. A second call
/// fails with [`LogError::AlreadyInitialized`] and leaves the first instance
/// in place.
pub fn init(logger: Logger) -> Result<&'static Logger, LogError> {
    GLOBAL
        .set(logger)
        .map_err(|_| LogError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(LogError::AlreadyInitialized)
}

/// The process-wide logger, or `None` before [`init`] ran.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Wall-clock timestamp used by the call-site macros, `HH:MM:SS.mmm`.
pub fn log_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SharedEntry;
    use crate::listener::LogListener;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct CaptureListener {
        entries: Mutex<Vec<SharedEntry>>,
    }

    impl CaptureListener {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                entries: Mutex::new(Vec::new()),
            })
        }

        fn texts(&self) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.text().to_string())
                .collect()
        }
    }

    impl LogListener for CaptureListener {
        fn on_log_entry(&self, entry: &SharedEntry) {
            self.entries.lock().unwrap().push(Arc::clone(entry));
        }
    }

    fn counting_sink() -> (Box<dyn SystemSink>, Arc<Mutex<String>>) {
        let captured = Arc::new(Mutex::new(String::new()));
        let capture = Arc::clone(&captured);
        let sink = move |args: fmt::Arguments<'_>| -> io::Result<usize> {
            let text = fmt::format(args);
            capture.lock().unwrap().push_str(&text);
            Ok(text.len())
        };
        (Box::new(sink), captured)
    }

    #[test]
    fn test_log_returns_sink_count_without_listeners() {
        let (sink, captured) = counting_sink();
        let logger = Logger::with_sink(sink);

        let written = logger.log(format_args!("hello sink")).unwrap();
        assert_eq!(written, 10);
        assert_eq!(*captured.lock().unwrap(), "hello sink");
    }

    #[test]
    fn test_listener_count_wins_over_sink_count() {
        // Sink reports a shorter count than the listener entry
        let sink = |args: fmt::Arguments<'_>| -> io::Result<usize> {
            let _ = args;
            Ok(1)
        };
        let logger = Logger::with_sink(Box::new(sink));
        let listener = CaptureListener::new();
        logger.add_listener(listener.clone());

        let written = logger.log(format_args!("full line")).unwrap();
        assert_eq!(written, 9);
    }

    #[test]
    fn test_sink_failure_still_notifies_listeners() {
        let sink = |_args: fmt::Arguments<'_>| -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "serial gone"))
        };
        let logger = Logger::with_sink(Box::new(sink));
        let listener = CaptureListener::new();
        logger.add_listener(listener.clone());

        let result = logger.log(format_args!("survives sink failure"));
        assert!(matches!(result, Err(LogError::Sink(_))));
        assert_eq!(listener.texts(), vec!["survives sink failure"]);
    }

    #[test]
    fn test_no_listeners_skips_entry_construction() {
        let logger = Logger::without_sink();

        // Empty format args would fail entry construction; with an empty
        // registry the construction never runs, so this succeeds with 0.
        assert_eq!(logger.notify_listeners(format_args!("")).unwrap(), 0);

        let listener = CaptureListener::new();
        logger.add_listener(listener);
        let result = logger.notify_listeners(format_args!(""));
        assert!(matches!(result, Err(LogError::Formatting)));
    }

    #[test]
    fn test_fallback_buffer_collects_when_unlistened() {
        let logger = Logger::without_sink().with_fallback(512);

        let written = logger.log(format_args!("buffered line")).unwrap();
        assert_eq!(written, 13);
        assert_eq!(logger.drain_fallback().unwrap(), "buffered line");
        assert!(logger.drain_fallback().is_none());
    }

    #[test]
    fn test_fallback_skipped_once_listener_registered() {
        let logger = Logger::without_sink().with_fallback(512);
        let listener = CaptureListener::new();
        logger.add_listener(listener.clone());

        logger.log(format_args!("to listener")).unwrap();
        assert!(logger.drain_fallback().is_none());
        assert_eq!(listener.texts(), vec!["to listener"]);
    }

    #[test]
    fn test_remove_listener_reports_membership() {
        let logger = Logger::without_sink();
        let listener = CaptureListener::new();
        let handle: ListenerHandle = listener;

        logger.add_listener(Arc::clone(&handle));
        assert_eq!(logger.listener_count(), 1);
        assert!(logger.remove_listener(&handle));
        assert!(!logger.remove_listener(&handle));
        assert_eq!(logger.listener_count(), 0);
    }

    #[test]
    fn test_min_level_gate() {
        let logger = Logger::without_sink();
        assert_eq!(logger.min_level(), Severity::Info);
        assert!(logger.enabled(Severity::Error));
        assert!(logger.enabled(Severity::Info));
        assert!(!logger.enabled(Severity::Debug));

        logger.set_min_level(Severity::Debug);
        assert!(logger.enabled(Severity::Debug));

        logger.set_min_level(Severity::Error);
        assert!(!logger.enabled(Severity::Warning));
    }

    #[test]
    fn test_sink_only_logger_reports_zero_for_empty_args() {
        let (sink, _captured) = counting_sink();
        let logger = Logger::with_sink(sink);

        // An empty expansion is not an error when no listener needs an entry
        assert_eq!(logger.log(format_args!("")).unwrap(), 0);
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = log_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(stamp.len(), 12);
        assert_eq!(&stamp[2..3], ":");
        assert_eq!(&stamp[5..6], ":");
        assert_eq!(&stamp[8..9], ".");
    }
}
