//! Handling of unreadable files on the write path.

use std::fmt;

/// What a write operation does when the existing file cannot be parsed.
///
/// Read operations are unaffected: they always fall back to the caller's
/// default.  The choice only matters when a write would otherwise replace
/// a corrupt file with a fresh document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptFilePolicy {
    /// Leave the file untouched and report the write as failed.
    #[default]
    Abort,
    /// Start from an empty document and overwrite the file.
    Discard,
}

impl fmt::Display for CorruptFilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptFilePolicy::Abort => f.write_str("abort"),
            CorruptFilePolicy::Discard => f.write_str("discard"),
        }
    }
}
