//! Upload of generated artifacts (calendar files, landing pages).

use std::sync::Arc;

use bytes::Bytes;
use object_store::{Attribute, Attributes, PutOptions};
use tracing::info;

use pawcal_core::config::ReminderConfig;

use crate::backend::StorageBackend;
use crate::error::StorageError;

/// Writes a request's artifacts under its issued identifier and
/// returns the public URLs handed to downstream collaborators.
pub struct ArtifactStore {
    backend: Arc<StorageBackend>,
    calendar_prefix: String,
    page_prefix: String,
}

impl ArtifactStore {
    pub fn new(backend: Arc<StorageBackend>, config: &ReminderConfig) -> Self {
        Self {
            backend,
            calendar_prefix: config.calendar_prefix.clone(),
            page_prefix: config.page_prefix.clone(),
        }
    }

    /// Upload the .ics document for an identifier, returning its URL.
    pub async fn put_calendar(&self, id: &str, data: Vec<u8>) -> Result<String, StorageError> {
        let relative = format!("{}/{}.ics", self.calendar_prefix, id);
        let disposition = format!("attachment; filename=\"{}.ics\"", id);
        self.put(&relative, data, "text/calendar", Some(disposition))
            .await
    }

    /// Upload the landing page for an identifier, returning its URL.
    pub async fn put_page(&self, id: &str, html: String) -> Result<String, StorageError> {
        let relative = format!("{}/{}.html", self.page_prefix, id);
        self.put(&relative, html.into_bytes(), "text/html", None)
            .await
    }

    async fn put(
        &self,
        relative: &str,
        data: Vec<u8>,
        content_type: &str,
        disposition: Option<String>,
    ) -> Result<String, StorageError> {
        let key = self.backend.key(relative);
        let path = object_store::path::Path::from(key.as_str());

        // LocalFileSystem rejects put attributes; only S3 serves
        // these objects over HTTP anyway.
        let opts = if self.backend.is_remote() {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
            if let Some(d) = disposition {
                attributes.insert(Attribute::ContentDisposition, d.into());
            }
            PutOptions {
                attributes,
                ..Default::default()
            }
        } else {
            PutOptions::default()
        };

        self.backend
            .store()
            .put_opts(&path, Bytes::from(data).into(), opts)
            .await?;

        info!(key = %key, "artifact uploaded");
        Ok(self.backend.public_url(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;

    fn local_store(dir: &std::path::Path) -> ArtifactStore {
        let backend = Arc::new(StorageBackend::Local(LocalBackend::new(dir).unwrap()));
        let config = ReminderConfig {
            counter_key: "system/counter.txt".to_string(),
            calendar_prefix: "calendars".to_string(),
            page_prefix: "pages".to_string(),
        };
        ArtifactStore::new(backend, &config)
    }

    #[tokio::test]
    async fn calendar_lands_under_identifier_key() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = local_store(tmp.path());

        let url = artifacts
            .put_calendar("QR0001_Daisy_NexGard", b"BEGIN:VCALENDAR".to_vec())
            .await
            .unwrap();

        assert!(url.ends_with("calendars/QR0001_Daisy_NexGard.ics"));
        let written = tmp.path().join("calendars/QR0001_Daisy_NexGard.ics");
        assert_eq!(std::fs::read(written).unwrap(), b"BEGIN:VCALENDAR");
    }

    #[tokio::test]
    async fn page_lands_under_identifier_key() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = local_store(tmp.path());

        let url = artifacts
            .put_page("QR0001_Daisy_NexGard", "<html></html>".to_string())
            .await
            .unwrap();

        assert!(url.ends_with("pages/QR0001_Daisy_NexGard.html"));
        assert!(tmp.path().join("pages/QR0001_Daisy_NexGard.html").exists());
    }
}
