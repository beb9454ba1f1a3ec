// Batch ingestion: one sequential pass over candidate URLs.
//
// Per URL: validate → dedup against the working set → extract → build →
// append. The working set starts as the known collection and grows as
// records are added, so URL k is checked against everything accepted from
// URLs 1..k-1 in the same batch.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use linkshelf_archive::MetadataExtractor;
use linkshelf_common::{is_valid_http_url, LinkRecord};
use tracing::{info, warn};

use crate::dedup::KnownUrls;
use crate::error::Result;
use crate::factory::{DefaultRecordFactory, RecordFactory};
use crate::stats::{IngestReport, IngestStats, ItemOutcome, ItemResult};

/// Records visible to duplicate checks during a run.
struct WorkingSet {
    records: Vec<LinkRecord>,
    keys: KnownUrls,
    /// Index of the first record added by this run.
    first_new: usize,
}

impl WorkingSet {
    fn seed(known: Vec<LinkRecord>) -> Self {
        let mut keys = KnownUrls::default();
        for record in &known {
            keys.insert(&record.url);
        }
        let first_new = known.len();
        Self {
            records: known,
            keys,
            first_new,
        }
    }

    fn contains(&self, url: &str) -> bool {
        self.keys.contains(url)
    }

    fn push(&mut self, record: LinkRecord) {
        self.keys.insert(&record.url);
        self.records.push(record);
    }

    /// (full collection, records added this run)
    fn finish(self) -> (Vec<LinkRecord>, Vec<LinkRecord>) {
        let new_records = self.records[self.first_new..].to_vec();
        (self.records, new_records)
    }
}

pub struct Ingestor {
    extractor: Arc<dyn MetadataExtractor>,
    factory: Arc<dyn RecordFactory>,
}

impl Ingestor {
    pub fn new(extractor: Arc<dyn MetadataExtractor>, factory: Arc<dyn RecordFactory>) -> Self {
        Self { extractor, factory }
    }

    pub fn with_default_factory(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self::new(extractor, Arc::new(DefaultRecordFactory::new()))
    }

    /// Process `candidates` in order against `known`. Never fails as a whole:
    /// each URL ends up added, skipped or failed, a panic included. Persisting
    /// the result is the caller's job.
    pub async fn run(&self, candidates: &[String], known: Vec<LinkRecord>) -> IngestReport {
        info!(
            candidates = candidates.len(),
            known = known.len(),
            "ingest: starting batch"
        );

        let mut working = WorkingSet::seed(known);
        let mut stats = IngestStats::default();
        let mut outcomes = Vec::with_capacity(candidates.len());

        for raw in candidates {
            let url = raw.trim();
            let outcome = match AssertUnwindSafe(self.process(url, &mut working))
                .catch_unwind()
                .await
            {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    warn!(url, error = %e, "ingest: item failed");
                    ItemOutcome::Failed(e.to_string())
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(url, error = %message, "ingest: item panicked");
                    ItemOutcome::Failed(message)
                }
            };
            info!(url, outcome = %outcome, "ingest: item done");
            stats.record(&outcome);
            outcomes.push(ItemResult {
                url: url.to_string(),
                outcome,
            });
        }

        let (collection, new_records) = working.finish();
        info!(
            added = stats.added,
            skipped = stats.skipped,
            failed = stats.failed,
            "ingest: batch complete"
        );

        IngestReport {
            stats,
            outcomes,
            new_records,
            collection,
        }
    }

    async fn process(&self, url: &str, working: &mut WorkingSet) -> Result<ItemOutcome> {
        if !is_valid_http_url(url) {
            return Ok(ItemOutcome::SkippedInvalid);
        }
        if working.contains(url) {
            return Ok(ItemOutcome::SkippedDuplicate);
        }

        let metadata = self.extractor.extract(url).await;
        let record = self.factory.create(url, metadata)?;
        working.push(record);
        Ok(ItemOutcome::Added)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
