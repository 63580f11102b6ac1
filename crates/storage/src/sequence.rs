//! Sequence-numbered artifact identifiers.
//!
//! Every submission gets one identifier naming all of its artifacts
//! (calendar file, landing page). The number comes from the shared
//! counter; the rest is sanitized from the pet and product names.

use std::sync::Arc;

use tracing::warn;

use crate::counter::CounterStore;
use crate::error::StorageError;

/// Maximum characters kept from each sanitized name segment.
const NAME_SEGMENT_MAX: usize = 10;

/// Issues strictly increasing sequence numbers from the shared
/// counter, degrading to a process-local counter when the store stops
/// accepting writes.
///
/// Degraded mode is permanent for the process lifetime and never
/// retried; its numbers can collide with another process's successful
/// issuances, which is accepted as best-effort.
pub struct SequenceIdIssuer {
    store: Arc<dyn CounterStore>,
    /// Last locally issued value once degraded mode is engaged.
    local: Option<u64>,
}

impl SequenceIdIssuer {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store, local: None }
    }

    pub fn is_degraded(&self) -> bool {
        self.local.is_some()
    }

    /// Issue the next sequence number. Infallible: counter-store
    /// failures switch to the local counter instead of surfacing.
    pub async fn issue_next(&mut self) -> u64 {
        if let Some(last) = self.local {
            let next = last + 1;
            self.local = Some(next);
            return next;
        }

        match self.store.increment().await {
            Ok(value) => value,
            Err(StorageError::CounterWriteFailed { value, reason }) => {
                warn!(value, %reason, "counter write-back failed, switching to process-local counter");
                self.local = Some(value);
                value
            }
            Err(e) => {
                warn!(error = %e, "counter store unavailable, switching to process-local counter");
                self.local = Some(1);
                1
            }
        }
    }
}

/// Render the artifact identifier for a sequence number:
/// `QR` + zero-padded sequence + sanitized pet and product names.
///
/// The product name is cut at its first parenthesis (package-size
/// suffixes like "(Flea & Tick)" carry no identity), then both names
/// are filtered to alphanumerics and truncated.
pub fn make_identifier(seq: u64, pet_name: &str, product_name: &str) -> String {
    let product_base = product_name.split('(').next().unwrap_or(product_name);
    format!(
        "QR{:04}_{}_{}",
        seq,
        sanitize(pet_name),
        sanitize(product_base)
    )
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .take(NAME_SEGMENT_MAX)
        .collect()
}
