use thiserror::Error;

use almacen_core::DomainError;

/// Store operation error.
///
/// Domain rejections pass through transparently so callers can match on
/// [`DomainError`] without unwrapping; the remaining variants are
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The movement (or lookup) was rejected by domain rules. The
    /// transaction was rolled back before this surfaced.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A lock wait or statement timed out. Transient: the caller may retry.
    #[error("busy: {0}")]
    Busy(String),

    /// Connection, query or constraint failure. Not retryable as-is.
    #[error("storage failure: {0}")]
    Storage(String),
}
