// Source detection: host pattern matching and content-type routing.

use linkshelf_common::{parse_absolute, SourceTag};

/// Host substrings per source, checked in order. First hit wins.
const SOURCE_PATTERNS: &[(SourceTag, &[&str])] = &[
    (SourceTag::Twitter, &["twitter.com", "x.com"]),
    (SourceTag::Youtube, &["youtube.com", "youtu.be"]),
    (SourceTag::Github, &["github.com"]),
];

/// Classify a URL by its host. Never fails: anything unparseable is `Web`.
pub fn classify(url: &str) -> SourceTag {
    let host = match parse_absolute(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => return SourceTag::Web,
        },
        Err(_) => return SourceTag::Web,
    };

    SOURCE_PATTERNS
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| host.contains(n)))
        .map(|(tag, _)| *tag)
        .unwrap_or(SourceTag::Web)
}

/// Does a Content-Type header declare an HTML document?
pub(crate) fn is_html_content_type(content_type: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.contains("text/html") || ct.contains("application/xhtml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_and_x_hosts() {
        for url in [
            "https://twitter.com/handle/status/1",
            "https://x.com/handle/status/1",
            "https://mobile.twitter.com/handle",
            "https://X.COM/handle",
        ] {
            assert_eq!(classify(url), SourceTag::Twitter, "{url}");
        }
    }

    #[test]
    fn youtube_hosts() {
        assert_eq!(classify("https://www.youtube.com/watch?v=abc"), SourceTag::Youtube);
        assert_eq!(classify("https://youtu.be/abc"), SourceTag::Youtube);
    }

    #[test]
    fn github_host() {
        assert_eq!(classify("https://github.com/rust-lang/rust"), SourceTag::Github);
    }

    #[test]
    fn generic_host_is_web() {
        assert_eq!(classify("https://city.gov/about"), SourceTag::Web);
    }

    #[test]
    fn unparseable_input_is_web() {
        assert_eq!(classify("not a url"), SourceTag::Web);
        assert_eq!(classify(""), SourceTag::Web);
        assert_eq!(classify("mailto:someone@github.com"), SourceTag::Web);
    }

    #[test]
    fn match_is_on_host_not_path() {
        assert_eq!(classify("https://example.com/twitter.com/x"), SourceTag::Web);
    }

    #[test]
    fn earlier_rule_wins_when_host_matches_several() {
        assert_eq!(classify("https://github.com.x.com/"), SourceTag::Twitter);
        assert_eq!(classify("https://youtube.com.github.com/"), SourceTag::Youtube);
    }

    #[test]
    fn content_type_html() {
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(is_html_content_type("TEXT/HTML"));
    }

    #[test]
    fn content_type_not_html() {
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type(""));
    }
}
