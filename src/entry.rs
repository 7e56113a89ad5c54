// SPDX-License-Identifier: Apache-2.0 OR MIT
// Immutable, reference-counted formatted log entries

use crate::error::LogError;
use std::fmt;
use std::sync::Arc;

/// One formatted log message.
///
/// The entry owns its text and is immutable after construction. It is shared
/// by reference among the logger and every listener notified for it; the
/// storage is freed when the last [`SharedEntry`] handle is dropped. A
/// listener that needs the entry beyond the notification callback clones the
/// handle instead of copying the text.
pub struct LogEntry {
    text: Box<str>,
}

/// Shared handle to a [`LogEntry`].
pub type SharedEntry = Arc<LogEntry>;

impl LogEntry {
    /// Expand `args` once into a new shared entry.
    ///
    /// Fails with [`LogError::Formatting`] when the expansion produces no
    /// output; no entry exists in that case and the log line is dropped.
    pub fn format(args: fmt::Arguments<'_>) -> Result<SharedEntry, LogError> {
        let text = fmt::format(args);
        if text.is_empty() {
            return Err(LogError::Formatting);
        }
        Ok(Arc::new(Self {
            text: text.into_boxed_str(),
        }))
    }

    /// Read-only view over the formatted text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the formatted text in bytes. Always non-zero for a
    /// constructed entry.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for LogEntry {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for LogEntry {
    fn eq(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("text", &self.text)
            .finish()
    }
}
