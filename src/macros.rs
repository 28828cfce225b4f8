//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes a logger, an optional carrier (`None` or
//! `Some(&ctx)`), and `format!`-style arguments, and forwards to the
//! corresponding formatted entry point.
//!
//! # Examples
//!
//! ```
//! use sitelog::prelude::*;
//! use sitelog::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::new(Arc::new(MemorySink::new()), Level::Info);
//!
//! info!(logger, None, "server started");
//!
//! let port = 8080;
//! info!(logger, None, "listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use sitelog::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::new(Arc::new(MemorySink::new()), Level::Info);
/// use sitelog::log;
/// log!(logger, None, Level::Info, "ready");
/// log!(logger, None, Level::Error, "exit code {}", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $ctx:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($ctx, $level, format_args!($($arg)+))
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.debugf($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.infof($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.warnf($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.errorf($ctx, format_args!($($arg)+))
    };
}

/// Emit a formatted CRITICAL line synchronously, then invoke the exit hook.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.fatalf($ctx, format_args!($($arg)+))
    };
}
