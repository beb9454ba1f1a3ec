// URL validation and canonical comparison keys.

use url::Url;

use crate::error::{CommonError, Result};

/// Parse a string as an absolute URL. Surrounding whitespace is ignored.
pub fn parse_absolute(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommonError::InvalidUrl("empty URL".to_string()));
    }
    Url::parse(trimmed).map_err(|e| CommonError::InvalidUrl(format!("{trimmed}: {e}")))
}

/// True when the string is an absolute `http` or `https` URL with a host.
pub fn is_valid_http_url(raw: &str) -> bool {
    match parse_absolute(raw) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Canonicalize a URL into a comparison key.
///
/// Lowercases scheme and host, keeps the port only when it is not the
/// scheme default, strips one trailing `/` from any path longer than `/`,
/// sorts query pairs by key (stable, so repeated keys keep their order)
/// and drops the fragment.
pub fn normalize_url(raw: &str) -> Result<String> {
    let parsed = parse_absolute(raw)?;

    let mut key = String::with_capacity(raw.len());
    key.push_str(&parsed.scheme().to_lowercase());

    match parsed.host_str() {
        Some(host) => {
            key.push_str("://");
            key.push_str(&host.to_lowercase());
            // `port()` is None when the port is the scheme default, explicit or not.
            if let Some(port) = parsed.port() {
                key.push(':');
                key.push_str(&port.to_string());
            }
        }
        None => key.push(':'),
    }

    let path = parsed.path();
    let path = if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    };
    key.push_str(path);

    if let Some(query) = sorted_query(&parsed) {
        key.push('?');
        key.push_str(&query);
    }

    Ok(key)
}

/// Re-serialize the query with pairs ordered by key. None when there is no
/// query or it holds no pairs.
fn sorted_query(parsed: &Url) -> Option<String> {
    parsed.query()?;

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        return None;
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    Some(
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter())
            .finish(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(url: &str) -> String {
        normalize_url(url).unwrap()
    }

    #[test]
    fn trailing_slash_host_case_and_fragment_are_equivalent() {
        let base = norm("https://example.com/p");
        assert_eq!(norm("https://Example.com/p/"), base);
        assert_eq!(norm("https://example.com/p#frag"), base);
        assert_eq!(norm("HTTPS://EXAMPLE.COM/p/#x"), base);
    }

    #[test]
    fn query_order_is_irrelevant() {
        assert_eq!(
            norm("https://example.com/p?b=2&a=1"),
            norm("https://example.com/p?a=1&b=2")
        );
    }

    #[test]
    fn repeated_keys_keep_relative_order() {
        assert_eq!(
            norm("https://example.com/p?t=2&a=1&t=1"),
            "https://example.com/p?a=1&t=2&t=1"
        );
        assert_ne!(
            norm("https://example.com/p?t=2&t=1"),
            norm("https://example.com/p?t=1&t=2")
        );
    }

    #[test]
    fn path_case_scheme_and_query_values_matter() {
        assert_ne!(norm("https://example.com/P"), norm("https://example.com/p"));
        assert_ne!(norm("http://example.com/p"), norm("https://example.com/p"));
        assert_ne!(
            norm("https://example.com/p?a=1"),
            norm("https://example.com/p?a=2")
        );
    }

    #[test]
    fn root_path_is_preserved() {
        assert_eq!(norm("https://example.com/"), "https://example.com/");
        assert_eq!(norm("https://example.com"), "https://example.com/");
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(norm("https://example.com/a//"), "https://example.com/a/");
    }

    #[test]
    fn default_ports_are_dropped_whether_explicit_or_not() {
        assert_eq!(norm("https://example.com:443/p"), norm("https://example.com/p"));
        assert_eq!(norm("http://example.com:80/p"), norm("http://example.com/p"));
        assert_eq!(norm("https://example.com:8443/p"), "https://example.com:8443/p");
        assert_ne!(norm("https://example.com:80/p"), norm("https://example.com/p"));
    }

    #[test]
    fn empty_query_is_dropped() {
        assert_eq!(norm("https://example.com/p?"), "https://example.com/p");
    }

    #[test]
    fn normalization_is_idempotent() {
        for url in [
            "https://Example.com/p/",
            "https://example.com/p?b=2&a=1#top",
            "http://localhost:8080/x/y/?q=a+b&z=%2F",
            "https://example.com",
            "https://example.com/search?q=caf%C3%A9",
        ] {
            let once = norm(url);
            assert_eq!(norm(&once), once, "not idempotent for {url}");
        }
    }

    #[test]
    fn doubled_trailing_slash_needs_a_second_pass() {
        // One separator per pass: a doubled slash is the only input where the
        // key is not a fixed point.
        let once = norm("https://a.com/a//");
        assert_eq!(once, "https://a.com/a/");
        assert_eq!(norm(&once), "https://a.com/a");
    }

    #[test]
    fn invalid_inputs_fail() {
        for bad in ["", "   ", "not-a-url", "/relative/path", "://missing"] {
            assert!(
                matches!(normalize_url(bad), Err(CommonError::InvalidUrl(_))),
                "expected InvalidUrl for {bad:?}"
            );
        }
    }

    #[test]
    fn http_validation_requires_http_scheme() {
        assert!(is_valid_http_url("https://ok.com"));
        assert!(is_valid_http_url("  http://ok.com/path  "));
        assert!(!is_valid_http_url("ftp://ok.com"));
        assert!(!is_valid_http_url("mailto:someone@ok.com"));
        assert!(!is_valid_http_url("not-a-url"));
        assert!(!is_valid_http_url(""));
    }
}
