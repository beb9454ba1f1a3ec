// Link record construction: validated URL + metadata → immutable record.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use linkshelf_archive::classify;
use linkshelf_common::{parse_absolute, LinkRecord, Metadata};
use uuid::Uuid;

use crate::error::{IngestError, Result};

/// Builds records. A failure here is an unexpected per-item error: the URL
/// has already been validated by the time a factory sees it.
pub trait RecordFactory: Send + Sync {
    fn create(&self, url: &str, metadata: Metadata) -> Result<LinkRecord>;
}

/// Assemble a record from its parts.
///
/// Trims the URL and every metadata field. A blank title becomes the URL.
/// Fails with `InvalidUrl` when the URL is empty or not absolute.
pub fn create_record(
    url: &str,
    metadata: Metadata,
    id: String,
    added: DateTime<Utc>,
) -> Result<LinkRecord> {
    let url = url.trim();
    parse_absolute(url)?;

    let title = match metadata.title.trim() {
        "" => url.to_string(),
        t => t.to_string(),
    };

    Ok(LinkRecord {
        id,
        url: url.to_string(),
        title,
        description: metadata.description.trim().to_string(),
        image: metadata.image.trim().to_string(),
        author: metadata.author.trim().to_string(),
        added,
        source: classify(url),
    })
}

/// Random v4 ids, wall-clock timestamps that never go backwards.
#[derive(Default)]
pub struct DefaultRecordFactory {
    last_added: Mutex<Option<DateTime<Utc>>>,
}

impl DefaultRecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_timestamp(&self) -> Result<DateTime<Utc>> {
        let mut last = self
            .last_added
            .lock()
            .map_err(|_| IngestError::Record("timestamp lock poisoned".to_string()))?;
        let now = Utc::now();
        let added = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(added);
        Ok(added)
    }
}

impl RecordFactory for DefaultRecordFactory {
    fn create(&self, url: &str, metadata: Metadata) -> Result<LinkRecord> {
        let added = self.next_timestamp()?;
        create_record(url, metadata, Uuid::new_v4().to_string(), added)
    }
}
