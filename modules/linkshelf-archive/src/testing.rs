// Test double for the HTTP boundary.
//
// MockHttp: HashMap-based URL→reply. Unregistered URLs fail with a network
// error, so a test only has to register what it expects to be fetched.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ArchiveError, Result};
use crate::http::{HttpFetcher, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
enum MockReply {
    Response(HttpResponse),
    Timeout,
    Network(String),
}

/// Builder pattern: `.on_html()`, `.on_json()`, `.on_status()`, `.on_timeout()`.
#[derive(Default)]
pub struct MockHttp {
    replies: HashMap<String, MockReply>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_response(mut self, url: &str, response: HttpResponse) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Response(response));
        self
    }

    pub fn on_html(self, url: &str, html: &str) -> Self {
        self.on_response(
            url,
            HttpResponse {
                status: 200,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: html.to_string(),
            },
        )
    }

    pub fn on_json(self, url: &str, json: serde_json::Value) -> Self {
        self.on_response(
            url,
            HttpResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: json.to_string(),
            },
        )
    }

    pub fn on_status(self, url: &str, status: u16) -> Self {
        self.on_response(
            url,
            HttpResponse {
                status,
                content_type: None,
                body: String::new(),
            },
        )
    }

    pub fn on_timeout(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), MockReply::Timeout);
        self
    }

    pub fn on_network_error(mut self, url: &str, message: &str) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Network(message.to_string()));
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpFetcher for MockHttp {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        match self.replies.get(&request.url) {
            Some(MockReply::Response(resp)) => Ok(resp.clone()),
            Some(MockReply::Timeout) => Err(ArchiveError::Timeout(request.url.clone())),
            Some(MockReply::Network(msg)) => Err(ArchiveError::Network(msg.clone())),
            None => Err(ArchiveError::Network(format!(
                "MockHttp: no response registered for {}",
                request.url
            ))),
        }
    }
}
