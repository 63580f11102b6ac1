use tokio::sync::Mutex;

use pawcal_ical::CalendarSerializer;
use pawcal_storage::{ArtifactStore, SequenceIdIssuer};

pub struct AppState {
    /// One issuance at a time; the request path is synchronous anyway.
    pub issuer: Mutex<SequenceIdIssuer>,
    pub artifacts: ArtifactStore,
    pub serializer: Box<dyn CalendarSerializer>,
}
