// SPDX-License-Identifier: Apache-2.0 OR MIT
// Call-site macros: severity, timestamp and caller-context composition

/// Log one line through `logger` with an explicit severity.
///
/// Skipped entirely when the logger's minimum level filters the severity
/// out. The emitted line is `"{letter} [{timestamp}] {module}: {message}\n"`
/// wrapped in the severity's ANSI color, with the calling module taken from
/// `module_path!()`.
///
/// # Examples
/// ```ignore
/// log_line!(logger, Severity::Warning, "buffer at {} bytes", used);
/// ```
#[macro_export]
macro_rules! log_line {
    ($logger:expr, $severity:expr, $($arg:tt)*) => {{
        let logger = &$logger;
        let severity = $severity;
        if logger.enabled(severity) {
            let _ = logger.log(format_args!(
                "{}{} [{}] {}: {}{}\n",
                severity.color(),
                severity.letter(),
                $crate::log_timestamp(),
                module_path!(),
                format_args!($($arg)*),
                $crate::Severity::COLOR_RESET,
            ));
        }
    }};
}

/// Log a message with error severity
///
/// # Examples
/// ```ignore
/// log_error!(logger, "failed to open {}: {}", path, err);
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_line!($logger, $crate::Severity::Error, $($arg)*)
    };
}

/// Log a message with warning severity
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_line!($logger, $crate::Severity::Warning, $($arg)*)
    };
}

/// Log a message with info severity
///
/// # Examples
/// ```ignore
/// log_info!(logger, "listener registered, {} total", count);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_line!($logger, $crate::Severity::Info, $($arg)*)
    };
}

/// Log a message with debug severity
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_line!($logger, $crate::Severity::Debug, $($arg)*)
    };
}

/// Append raw text to the log: no severity prefix, no timestamp, no
/// automatic newline. Useful to build one log line across several calls.
/// Evaluates to the `log` result.
///
/// # Examples
/// ```ignore
/// log_append!(logger, "route {} -> ", src)?;
/// log_append!(logger, "{}\n", dst)?;
/// ```
#[macro_export]
macro_rules! log_append {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log(format_args!($($arg)*))
    };
}
