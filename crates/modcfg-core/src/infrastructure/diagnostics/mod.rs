//! Injectable diagnostic sink.
//!
//! The store reports every attempt, success and failure through a
//! [`DiagnosticSink`] instead of a process-wide logger.  Two sinks ship with
//! the crate:
//!
//! - [`TracingSink`] forwards to the `tracing` macros.  This is the default.
//! - [`MemorySink`] records messages in memory so tests and embedders can
//!   inspect them.
//!
//! # Testability
//!
//! Unit tests use the `mockall`-generated `MockDiagnosticSink` to assert that
//! a failure was reported at the expected level.

use std::fmt;

pub mod memory;
pub mod tracing_sink;

pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// Receives diagnostic messages from the store.
///
/// Implementations must be cheap and must not fail; the store shares one sink
/// across clones via `Arc<dyn DiagnosticSink>`.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_order_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::Error.to_string(), "error");
    }
}
