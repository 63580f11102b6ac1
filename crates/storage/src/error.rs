use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("counter store unavailable: {0}")]
    CounterUnavailable(String),

    /// The counter value was read and advanced but the write-back
    /// failed. Carries the value computed for this issuance so the
    /// caller can still honor it.
    #[error("counter write-back failed at value {value}: {reason}")]
    CounterWriteFailed { value: u64, reason: String },

    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    Other(String),
}
