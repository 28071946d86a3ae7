use crate::store::StoreError;

// ============================================================================
// Customer Domain Errors
// ============================================================================

/// Caller-visible, non-retryable domain errors. Lower-level storage failures
/// pass through untranslated inside the `Store` variant.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("customer with id [{0}] not found")]
    NotFound(i64),

    #[error("email already taken")]
    DuplicateEmail,

    #[error("no data changes found")]
    NoChanges,

    #[error(transparent)]
    Store(#[from] StoreError),
}
