use std::collections::HashSet;

use linkshelf_common::normalize_url;

/// Normalized comparison keys for a set of known URLs, computed once.
#[derive(Debug, Default, Clone)]
pub struct KnownUrls {
    keys: HashSet<String>,
}

impl KnownUrls {
    /// Known URLs that fail to normalize are left out.
    pub fn from_urls<S: AsRef<str>>(urls: &[S]) -> Self {
        let mut known = Self::default();
        for url in urls {
            known.insert(url.as_ref());
        }
        known
    }

    pub fn insert(&mut self, url: &str) {
        if let Ok(key) = normalize_url(url) {
            self.keys.insert(key);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A candidate that fails to normalize is never contained.
    pub fn contains(&self, url: &str) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        normalize_url(url)
            .map(|key| self.keys.contains(&key))
            .unwrap_or(false)
    }
}

/// Is `url` equivalent, after normalization, to any of `known`?
///
/// Known URLs that fail to normalize never match. A candidate that fails to
/// normalize is reported as not a duplicate; rejecting malformed input is the
/// caller's job.
pub fn is_duplicate<S: AsRef<str>>(url: &str, known: &[S]) -> bool {
    if known.is_empty() {
        return false;
    }
    KnownUrls::from_urls(known).contains(url)
}
