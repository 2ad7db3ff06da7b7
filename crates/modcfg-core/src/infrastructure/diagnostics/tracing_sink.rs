//! [`DiagnosticSink`] backed by the `tracing` crate.

use tracing::{debug, error, info, warn};

use super::DiagnosticSink;

/// Forwards every message to `tracing` under the `modcfg` target.
///
/// Whether anything is printed depends on the subscriber the host installed;
/// the `modcfg` binary filters with `RUST_LOG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn debug(&self, message: &str) {
        debug!(target: "modcfg", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "modcfg", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "modcfg", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "modcfg", "{message}");
    }
}
