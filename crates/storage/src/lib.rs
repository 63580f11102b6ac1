pub mod artifacts;
pub mod backend;
pub mod counter;
pub mod error;
pub mod sequence;

pub use artifacts::ArtifactStore;
pub use backend::{LocalBackend, S3Backend, StorageBackend};
pub use counter::{CounterStore, ObjectCounterStore};
pub use error::StorageError;
pub use sequence::{make_identifier, SequenceIdIssuer};
