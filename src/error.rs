// SPDX-License-Identifier: Apache-2.0 OR MIT
// Error taxonomy for the logging facility

use std::io;
use thiserror::Error;

/// Failures surfaced by logging operations.
///
/// None of these are fatal to the process; each one means a single log line
/// was dropped or only partially delivered.
#[derive(Debug, Error)]
pub enum LogError {
    /// Formatting expanded to zero output. No entry was produced and no
    /// listener was notified for this call.
    #[error("formatting produced no output")]
    Formatting,

    /// The system sink reported a write failure. Listeners were still
    /// notified for this call.
    #[error("system sink write failed: {0}")]
    Sink(#[from] io::Error),

    /// A global logger was already installed when [`init`](crate::init) was
    /// called again.
    #[error("global logger already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LogError::Formatting.to_string(),
            "formatting produced no output"
        );
        assert_eq!(
            LogError::AlreadyInitialized.to_string(),
            "global logger already initialized"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LogError = io_err.into();
        assert!(matches!(err, LogError::Sink(_)));
    }
}
