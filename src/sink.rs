// System output sinks (the console/serial side of the logger)

use std::fmt;
use std::io::{self, Write};

/// Destination for the raw system-output copy of each log call.
///
/// The sink receives the same format arguments the listeners' entry is built
/// from and reports how many bytes it wrote. A failed write is folded into
/// the aggregate result of [`Logger::log`](crate::Logger::log), but listeners
/// are still notified for that call.
pub trait SystemSink: Send + Sync {
    fn write_log(&self, args: fmt::Arguments<'_>) -> io::Result<usize>;
}

/// Plain-text sink writing to stdout.
pub struct StdoutSink;

impl SystemSink for StdoutSink {
    fn write_log(&self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        let text = fmt::format(args);
        io::stdout().lock().write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

/// Plain-text sink writing to stderr.
pub struct StderrSink;

impl SystemSink for StderrSink {
    fn write_log(&self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        let text = fmt::format(args);
        io::stderr().lock().write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

/// Sink writing one JSON object per log call to stderr.
///
/// For deployments where the system output is read by a log shipper rather
/// than a person. The reported count is the length of the formatted message,
/// not of the JSON envelope.
pub struct JsonSink;

impl SystemSink for JsonSink {
    fn write_log(&self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        let text = fmt::format(args);
        let line = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "message": text,
        });
        writeln!(io::stderr().lock(), "{}", line)?;
        Ok(text.len())
    }
}

/// Any matching closure works as a sink. Keeps test harnesses and platform
/// hooks (vprintf-style redirection) trivial to wire up.
impl<F> SystemSink for F
where
    F: Fn(fmt::Arguments<'_>) -> io::Result<usize> + Send + Sync,
{
    fn write_log(&self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        self(args)
    }
}
