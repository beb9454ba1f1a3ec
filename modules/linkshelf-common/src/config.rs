use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::{CommonError, Result};

pub const DEFAULT_STORE_PATH: &str = "data/links.json";
pub const DEFAULT_BATCH_PATH: &str = "links.txt";
pub const DEFAULT_MIRROR_BASE: &str = "https://api.fxtwitter.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; linkshelf/0.1; +https://github.com/linkshelf/linkshelf)";
/// Sent to the social mirror API, which asks clients to identify themselves.
pub const MIRROR_USER_AGENT: &str = "linkshelf/0.1";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON array file holding the persisted collection.
    pub store_path: PathBuf,
    /// Plain-text batch of candidate URLs, one per line.
    pub batch_path: PathBuf,
    /// Base URL of the social mirror API. Tweet paths are appended to it.
    pub mirror_base: String,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            batch_path: PathBuf::from(DEFAULT_BATCH_PATH),
            mirror_base: DEFAULT_MIRROR_BASE.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let http_timeout = match optional_env("LINKSHELF_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    CommonError::Config(format!(
                        "LINKSHELF_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                    ))
                })?;
                if secs == 0 {
                    return Err(CommonError::Config(
                        "LINKSHELF_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            store_path: optional_env("LINKSHELF_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            batch_path: optional_env("LINKSHELF_BATCH")
                .map(PathBuf::from)
                .unwrap_or(defaults.batch_path),
            mirror_base: optional_env("LINKSHELF_MIRROR_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.mirror_base),
            http_timeout,
            user_agent: optional_env("LINKSHELF_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    pub fn log_summary(&self) {
        info!(
            store = %self.store_path.display(),
            batch = %self.batch_path.display(),
            mirror = self.mirror_base.as_str(),
            timeout_secs = self.http_timeout.as_secs(),
            "Config loaded"
        );
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
