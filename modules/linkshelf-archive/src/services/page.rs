// Page service: plain GET of an HTML page, metadata read from <head>.

use linkshelf_common::Metadata;
use scraper::{Html, Selector};
use tracing::{info, warn};

use super::fetch_bounded;
use crate::error::{ArchiveError, Result};
use crate::extractor::ExtractSettings;
use crate::http::{HttpFetcher, HttpRequest};
use crate::router::is_html_content_type;

/// Where one candidate value lives in the document.
#[derive(Debug, Clone, Copy)]
enum Candidate {
    /// `content` attribute of the first element matching the selector.
    Content(&'static str),
    /// Text of the first element matching the selector.
    Text(&'static str),
}

use Candidate::{Content, Text};

// Cascades are in priority order: the first non-blank candidate wins.
const TITLE: &[Candidate] = &[
    Content(r#"meta[property="og:title"]"#),
    Content(r#"meta[name="twitter:title"], meta[property="twitter:title"]"#),
    Text("title"),
];

const DESCRIPTION: &[Candidate] = &[
    Content(r#"meta[property="og:description"]"#),
    Content(r#"meta[name="twitter:description"], meta[property="twitter:description"]"#),
    Content(r#"meta[name="description"]"#),
];

const IMAGE: &[Candidate] = &[
    Content(r#"meta[property="og:image"]"#),
    Content(r#"meta[name="twitter:image"], meta[property="twitter:image"]"#),
];

const AUTHOR: &[Candidate] = &[
    Content(r#"meta[property="article:author"]"#),
    Content(r#"meta[name="author"]"#),
    Content(r#"meta[name="article:author"]"#),
];

/// Extract metadata for a web page. Never fails: any problem yields
/// `Metadata::degraded(url)`.
pub(crate) async fn extract(
    url: &str,
    http: &dyn HttpFetcher,
    settings: &ExtractSettings,
) -> Metadata {
    match fetch_page(url, http, settings).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(url, error = %e, "page: extraction degraded");
            Metadata::degraded(url)
        }
    }
}

async fn fetch_page(
    url: &str,
    http: &dyn HttpFetcher,
    settings: &ExtractSettings,
) -> Result<Metadata> {
    info!(url, "page: fetching");

    let request =
        HttpRequest::get(url, settings.user_agent.as_str(), settings.timeout).follow_redirects();
    let resp = fetch_bounded(http, &request).await?;
    if !resp.is_success() {
        return Err(ArchiveError::Status {
            status: resp.status,
            url: url.to_string(),
        });
    }

    let content_type = resp.content_type.as_deref().unwrap_or_default();
    if !is_html_content_type(content_type) {
        return Err(ArchiveError::Parse(format!(
            "expected HTML, got content type {content_type:?}"
        )));
    }

    info!(url, bytes = resp.body.len(), "page: fetched successfully");
    Ok(page_metadata(&resp.body, url))
}

/// Resolve every field from raw HTML. Title falls back to the URL, the rest
/// to empty strings.
pub(crate) fn page_metadata(html: &str, url: &str) -> Metadata {
    let document = Html::parse_document(html);
    Metadata {
        title: resolve(&document, TITLE).unwrap_or_else(|| url.to_string()),
        description: resolve(&document, DESCRIPTION).unwrap_or_default(),
        image: resolve(&document, IMAGE).unwrap_or_default(),
        author: resolve(&document, AUTHOR).unwrap_or_default(),
    }
}

fn resolve(document: &Html, cascade: &[Candidate]) -> Option<String> {
    cascade
        .iter()
        .filter_map(|candidate| candidate_value(document, *candidate))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn candidate_value(document: &Html, candidate: Candidate) -> Option<String> {
    let (selector, read_text) = match candidate {
        Content(s) => (s, false),
        Text(s) => (s, true),
    };
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    if read_text {
        Some(element.text().collect())
    } else {
        element.value().attr("content").map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/article";

    #[test]
    fn open_graph_wins_over_everything() {
        let html = r#"<html><head>
            <title>Doc Title</title>
            <meta name="twitter:title" content="Card Title">
            <meta property="og:title" content="OG Title">
            <meta property="og:description" content="OG Desc">
            <meta name="twitter:description" content="Card Desc">
            <meta name="description" content="Plain Desc">
            <meta property="og:image" content="https://img/og.png">
            <meta name="twitter:image" content="https://img/card.png">
            <meta property="article:author" content="OG Author">
            <meta name="author" content="Plain Author">
        </head><body></body></html>"#;
        let meta = page_metadata(html, URL);
        assert_eq!(meta.title, "OG Title");
        assert_eq!(meta.description, "OG Desc");
        assert_eq!(meta.image, "https://img/og.png");
        assert_eq!(meta.author, "OG Author");
    }

    #[test]
    fn card_tags_are_second_choice() {
        let html = r#"<html><head>
            <title>Doc Title</title>
            <meta name="twitter:title" content="Card Title">
            <meta name="twitter:description" content="Card Desc">
            <meta name="description" content="Plain Desc">
            <meta name="twitter:image" content="https://img/card.png">
        </head></html>"#;
        let meta = page_metadata(html, URL);
        assert_eq!(meta.title, "Card Title");
        assert_eq!(meta.description, "Card Desc");
        assert_eq!(meta.image, "https://img/card.png");
    }

    #[test]
    fn plain_tags_are_last_choice() {
        let html = r#"<html><head>
            <title>  Doc Title  </title>
            <meta name="description" content="Plain Desc">
            <meta name="author" content="Plain Author">
            <meta name="article:author" content="Alt Author">
        </head></html>"#;
        let meta = page_metadata(html, URL);
        assert_eq!(meta.title, "Doc Title");
        assert_eq!(meta.description, "Plain Desc");
        assert_eq!(meta.image, "");
        assert_eq!(meta.author, "Plain Author");
    }

    #[test]
    fn alternate_article_author_is_used_last() {
        let html = r#"<head><meta name="article:author" content="Alt Author"></head>"#;
        assert_eq!(page_metadata(html, URL).author, "Alt Author");
    }

    #[test]
    fn blank_candidates_are_skipped() {
        let html = r#"<html><head>
            <meta property="og:title" content="   ">
            <meta name="twitter:title" content="">
            <title>Real Title</title>
        </head></html>"#;
        assert_eq!(page_metadata(html, URL).title, "Real Title");
    }

    #[test]
    fn empty_document_uses_defaults() {
        let meta = page_metadata("<html><head></head><body>hi</body></html>", URL);
        assert_eq!(meta, Metadata::degraded(URL));
    }

    #[test]
    fn values_are_trimmed() {
        let html = r#"<head><meta property="og:description" content="
            spaced out
        "></head>"#;
        assert_eq!(page_metadata(html, URL).description, "spaced out");
    }
}
