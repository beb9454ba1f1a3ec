pub(crate) mod mirror;
pub(crate) mod page;

use crate::error::{ArchiveError, Result};
use crate::http::{HttpFetcher, HttpRequest, HttpResponse};

/// Run a request under its own timeout, whatever the fetcher does internally.
pub(crate) async fn fetch_bounded(
    http: &dyn HttpFetcher,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    match tokio::time::timeout(request.timeout, http.get(request)).await {
        Ok(result) => result,
        Err(_) => Err(ArchiveError::Timeout(format!(
            "{} after {}s",
            request.url,
            request.timeout.as_secs()
        ))),
    }
}
