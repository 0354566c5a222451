//! Errors reported by the tables

use thiserror::Error;

/// Why a resize request was refused.
///
/// `resize` on either table swallows these and leaves the table untouched; `try_resize`
/// hands them back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// An open addressing table cannot hold more entries than it has slots.
    #[error("cannot resize to {requested} slots while holding {size} entries")]
    BelowSize {
        /// The bucket count that was asked for
        requested: usize,
        /// Number of live entries at the time of the request
        size: usize,
    },
    /// A chained table needs at least one bucket.
    #[error("cannot resize to zero buckets")]
    ZeroCapacity,
}
