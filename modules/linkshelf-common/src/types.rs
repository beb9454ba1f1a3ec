use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Source classification ---

/// Where a link points. Closed set: anything unrecognized is `Web`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Twitter,
    Youtube,
    Github,
    Web,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Twitter => "twitter",
            SourceTag::Youtube => "youtube",
            SourceTag::Github => "github",
            SourceTag::Web => "web",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Extraction output ---

/// Metadata resolved for a single URL. Every field is always populated,
/// possibly with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: String,
}

impl Metadata {
    /// The fallback returned whenever extraction cannot produce anything:
    /// the URL as title, everything else empty.
    pub fn degraded(url: &str) -> Self {
        Self {
            title: url.to_string(),
            ..Self::default()
        }
    }
}

// --- Persisted record ---

/// One saved link. Created once by the record factory, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: String,
    pub added: DateTime<Utc>,
    pub source: SourceTag,
}
