//! Serializer trait definition and shared error type.

use pawcal_schedule::ReminderEvent;

/// Errors raised while rendering events to a calendar document.
#[derive(Debug, thiserror::Error)]
pub enum IcalError {
    #[error("calendar serialization failed: {0}")]
    Serialize(String),
}

/// Renders a set of events into a calendar-interchange byte stream.
///
/// The schedule pipeline treats the output as opaque; it is uploaded
/// and handed to calendar clients without inspection.
pub trait CalendarSerializer: Send + Sync {
    fn serialize(&self, events: &[ReminderEvent]) -> Result<Vec<u8>, IcalError>;
}
