// HTTP capability injected into the extraction strategies.
//
// Strategies only see `HttpFetcher`, so tests swap in `testing::MockHttp`
// and never touch the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::error::{ArchiveError, Result};

/// Max redirects followed when a request asks for redirect following.
const MAX_REDIRECTS: usize = 10;

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            user_agent: user_agent.into(),
            timeout,
            follow_redirects: false,
        }
    }

    pub fn follow_redirects(mut self) -> Self {
        self.follow_redirects = true;
        self
    }
}

/// What came back. `body` is only read for success statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Issue a GET. Transport failures and timeouts are errors; any HTTP
    /// status, including 4xx/5xx, is a response.
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// `HttpFetcher` backed by reqwest.
pub struct ReqwestFetcher {
    follow: reqwest::Client,
    no_follow: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let follow = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        let no_follow = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self { follow, no_follow })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let client = if request.follow_redirects {
            &self.follow
        } else {
            &self.no_follow
        };

        let resp = client
            .get(&request.url)
            .header(USER_AGENT, &request.user_agent)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ArchiveError::Timeout(format!(
                        "{} after {}s",
                        request.url,
                        request.timeout.as_secs()
                    ))
                } else {
                    ArchiveError::from(e)
                }
            })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        debug!(url = request.url.as_str(), status = status.as_u16(), "http: response");

        let body = if status.is_success() {
            resp.text().await?
        } else {
            String::new()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
