// Extractor: the public entry point for metadata extraction.
// Classifies the URL, picks a strategy, and always returns metadata.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use linkshelf_common::{Config, Metadata, SourceTag};
use tracing::debug;

use crate::http::HttpFetcher;
use crate::router::classify;
use crate::services::{mirror, page};

/// Knobs shared by every strategy.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub mirror_base: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ExtractSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mirror_base: config.mirror_base.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.http_timeout,
        }
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// How metadata is obtained for a source. Adding a source means adding a
/// variant here and a cascade in `services`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Post lookup through the social mirror JSON API.
    SocialMirror,
    /// Fetch the page and read its `<head>` tags.
    GenericWeb,
}

impl Strategy {
    pub fn for_source(source: SourceTag) -> Self {
        match source {
            SourceTag::Twitter => Strategy::SocialMirror,
            SourceTag::Youtube | SourceTag::Github | SourceTag::Web => Strategy::GenericWeb,
        }
    }

    /// Never fails; degraded metadata stands in for every error.
    pub async fn extract(
        self,
        url: &str,
        http: &dyn HttpFetcher,
        settings: &ExtractSettings,
    ) -> Metadata {
        match self {
            Strategy::SocialMirror => mirror::extract(url, http, settings).await,
            Strategy::GenericWeb => page::extract(url, http, settings).await,
        }
    }
}

/// Anything that can turn a URL into metadata without failing.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Metadata;
}

pub struct Extractor {
    http: Arc<dyn HttpFetcher>,
    settings: ExtractSettings,
}

impl Extractor {
    pub fn new(http: Arc<dyn HttpFetcher>, settings: ExtractSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl MetadataExtractor for Extractor {
    async fn extract(&self, url: &str) -> Metadata {
        let source = classify(url);
        let strategy = Strategy::for_source(source);
        debug!(url, %source, ?strategy, "extractor: dispatching");
        strategy
            .extract(url, self.http.as_ref(), &self.settings)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_twitter_uses_the_mirror() {
        assert_eq!(Strategy::for_source(SourceTag::Twitter), Strategy::SocialMirror);
        for tag in [SourceTag::Youtube, SourceTag::Github, SourceTag::Web] {
            assert_eq!(Strategy::for_source(tag), Strategy::GenericWeb);
        }
    }

    #[test]
    fn default_settings_use_ten_second_timeout() {
        assert_eq!(ExtractSettings::default().timeout, Duration::from_secs(10));
    }
}
