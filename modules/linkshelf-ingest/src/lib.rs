pub mod batch;
pub mod dedup;
pub mod error;
pub mod factory;
pub mod ingest;
pub mod stats;
pub mod store;

pub use batch::{clear_batch, read_batch};
pub use dedup::{is_duplicate, KnownUrls};
pub use error::{IngestError, Result};
pub use factory::{create_record, DefaultRecordFactory, RecordFactory};
pub use ingest::Ingestor;
pub use stats::{IngestReport, IngestStats, ItemOutcome, ItemResult};
pub use store::JsonFileStore;
