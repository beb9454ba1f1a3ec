// Social mirror service: resolves twitter/x status URLs through a public
// JSON mirror instead of scraping the (script-rendered) original page.

use linkshelf_common::config::MIRROR_USER_AGENT;
use linkshelf_common::{parse_absolute, Metadata};
use tracing::{info, warn};

use super::fetch_bounded;
use crate::error::{ArchiveError, Result};
use crate::extractor::ExtractSettings;
use crate::http::{HttpFetcher, HttpRequest};
use crate::types::{MirrorPost, MirrorResponse};

/// Longest title kept verbatim, in characters.
const MAX_TITLE_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// Extract metadata for a post URL. Never fails: any problem yields
/// `Metadata::degraded(url)`.
pub(crate) async fn extract(
    url: &str,
    http: &dyn HttpFetcher,
    settings: &ExtractSettings,
) -> Metadata {
    match fetch_post(url, http, settings).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(url, error = %e, "mirror: extraction degraded");
            Metadata::degraded(url)
        }
    }
}

async fn fetch_post(
    url: &str,
    http: &dyn HttpFetcher,
    settings: &ExtractSettings,
) -> Result<Metadata> {
    let endpoint = mirror_url(url, &settings.mirror_base)?;
    info!(url, endpoint = endpoint.as_str(), "mirror: fetching post");

    let request = HttpRequest::get(endpoint.as_str(), MIRROR_USER_AGENT, settings.timeout);
    let resp = fetch_bounded(http, &request).await?;
    if !resp.is_success() {
        return Err(ArchiveError::Status {
            status: resp.status,
            url: endpoint,
        });
    }

    let payload: MirrorResponse = serde_json::from_str(&resp.body)?;
    let post = payload
        .tweet
        .ok_or_else(|| ArchiveError::Parse(format!("no post in mirror response for {url}")))?;

    Ok(post_metadata(url, &post))
}

/// Move the post path onto the mirror host.
/// "https://x.com/jack/status/20?s=1" → "{mirror_base}/jack/status/20"
fn mirror_url(url: &str, mirror_base: &str) -> Result<String> {
    let parsed = parse_absolute(url).map_err(|e| ArchiveError::Parse(e.to_string()))?;
    Ok(format!(
        "{}{}",
        mirror_base.trim_end_matches('/'),
        parsed.path()
    ))
}

fn post_metadata(url: &str, post: &MirrorPost) -> Metadata {
    let text = post.content();
    let title = if text.trim().is_empty() {
        url.to_string()
    } else {
        truncate_title(text)
    };

    Metadata {
        title,
        description: text.to_string(),
        image: post.preview_image().to_string(),
        author: post.author_label().to_string(),
    }
}

/// Keep up to 100 characters; longer text becomes 97 characters plus "...".
fn truncate_title(text: &str) -> String {
    if text.chars().count() <= MAX_TITLE_CHARS {
        return text.to_string();
    }
    let keep = MAX_TITLE_CHARS - ELLIPSIS.len();
    let mut title: String = text.chars().take(keep).collect();
    title.push_str(ELLIPSIS);
    title
}
