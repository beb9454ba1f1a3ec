pub mod error;
pub mod extractor;
pub mod http;
pub mod router;
mod services;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod types;

pub use error::{ArchiveError, Result};
pub use extractor::{ExtractSettings, Extractor, MetadataExtractor, Strategy};
pub use http::{HttpFetcher, HttpRequest, HttpResponse, ReqwestFetcher};
pub use router::classify;
