//! Pattern-based extraction rules
//!
//! One rule per semantic field, each a pure function over the fetched body
//! (the `id` rule reads the URL instead). Fields that Facebook has shipped
//! in more than one markup shape get an ordered candidate list; the first
//! pattern that matches wins. A rule never panics and never fails the
//! request — no match simply means absence.
//!
//! Values returned here are *raw* captures, still carrying JSON string
//! escapes; decoding and cleanup live in [`super::normalize`].

use lazy_regex::{regex, regex_captures};
use regex::Regex;
use url::Url;

use super::Metrics;
use crate::core::validation::RESOURCE_SEGMENTS;

/// First capture group of `re` in `body`, if any.
fn first_capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the numeric resource ID from the source URL.
///
/// Takes the first all-digit path segment after a recognized resource
/// segment (`/watch/videos/123456789` → `123456789`); when no typed
/// segment is present, falls back to trailing digits of the path.
pub fn extract_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    if let Some(pos) = segments.iter().position(|s| RESOURCE_SEGMENTS.contains(s)) {
        if let Some(id) = segments[pos + 1..]
            .iter()
            .find(|s| s.bytes().all(|b| b.is_ascii_digit()) && !s.is_empty())
        {
            return Some((*id).to_string());
        }
    }

    regex_captures!(r"(\d+)/?$", url.path()).map(|(_, id)| id.to_string())
}

/// Page title: `<title>` tag, then the dedicated pageTitle element, then
/// the Open Graph meta tag.
pub fn extract_title(body: &str) -> Option<String> {
    first_capture(regex!(r"(?s)<title>(.*?)</title>"), body)
        .or_else(|| first_capture(regex!(r#"(?s)<title id="pageTitle">(.+?)</title>"#), body))
        .or_else(|| {
            first_capture(
                regex!(r#"<meta property="og:title" content="([^"]+)""#),
                body,
            )
        })
}

/// Video owner name from the inline state blob.
pub fn extract_author(body: &str) -> Option<String> {
    first_capture(regex!(r#""ownerName"\s*:\s*"([^"]+)""#), body).or_else(|| {
        first_capture(
            regex!(r#""owner"\s*:\s*\{[^{}]*?"name"\s*:\s*"([^"]+)""#),
            body,
        )
    })
}

/// Unix publish timestamp (epoch seconds) from the inline state blob.
pub fn extract_publish_time(body: &str) -> Option<i64> {
    first_capture(regex!(r#""publish_time"\s*:\s*(\d+)"#), body)?
        .parse()
        .ok()
}

/// Thumbnail image URL: Open Graph image meta tag, then the inline
/// preferred-thumbnail field.
pub fn extract_thumbnail(body: &str) -> Option<String> {
    first_capture(
        regex!(r#"<meta property="og:image" content="([^"]+)""#),
        body,
    )
    .or_else(|| {
        first_capture(
            regex!(r#""preferred_thumbnail"\s*:\s*\{"image"\s*:\s*\{"uri"\s*:\s*"([^"]+)""#),
            body,
        )
    })
}

/// Playback duration in whole seconds. One page variant carries seconds
/// directly, the other milliseconds.
pub fn extract_duration_secs(body: &str) -> Option<u64> {
    if let Some(secs) = first_capture(regex!(r#""length_in_second"\s*:\s*(\d+)"#), body) {
        return secs.parse().ok();
    }
    first_capture(regex!(r#""playable_duration_in_ms"\s*:\s*(\d+)"#), body)?
        .parse::<u64>()
        .ok()
        .map(|ms| ms / 1000)
}

/// Engagement counters. Purely presentational; every absent or
/// unparsable counter defaults to 0.
pub fn extract_metrics(body: &str) -> Metrics {
    Metrics {
        likes: count(body, &[
            regex!(r#""like_count"\s*:\s*(\d+)"#),
            regex!(r#""reaction_count"\s*:\s*\{"count"\s*:\s*(\d+)"#),
        ]),
        comments: count(body, &[
            regex!(r#""comment_count"\s*:\s*(\d+)"#),
            regex!(r#""total_comment_count"\s*:\s*(\d+)"#),
        ]),
        shares: count(body, &[
            regex!(r#""share_count"\s*:\s*\{"count"\s*:\s*(\d+)"#),
            regex!(r#""share_count"\s*:\s*(\d+)"#),
        ]),
    }
}

fn count(body: &str, patterns: &[&Regex]) -> u64 {
    patterns
        .iter()
        .find_map(|re| first_capture(re, body))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Standard-quality media URL.
pub fn extract_sd_link(body: &str) -> Option<String> {
    first_capture(regex!(r#"browser_native_sd_url"\s*:\s*"([^"]+)""#), body)
}

/// High-quality media URL.
pub fn extract_hd_link(body: &str) -> Option<String> {
    first_capture(regex!(r#"browser_native_hd_url"\s*:\s*"([^"]+)""#), body)
}

/// Generic playable URL; only consulted when neither SD nor HD matched.
pub fn extract_generic_link(body: &str) -> Option<String> {
    first_capture(regex!(r#""playable_url"\s*:\s*"([^"]+)""#), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn id_after_typed_segment() {
        assert_eq!(
            extract_id(&url("https://www.facebook.com/watch/videos/123456789")),
            Some("123456789".to_string())
        );
        assert_eq!(
            extract_id(&url("https://facebook.com/reel/987654321/")),
            Some("987654321".to_string())
        );
        // Digits further down the path still count
        assert_eq!(
            extract_id(&url("https://facebook.com/someone/videos/named-clip/555")),
            Some("555".to_string())
        );
    }

    #[test]
    fn id_from_trailing_digits_without_typed_segment() {
        assert_eq!(
            extract_id(&url("https://fb.watch/111222333")),
            Some("111222333".to_string())
        );
        assert_eq!(extract_id(&url("https://fb.watch/aBcDeF/")), None);
    }

    #[test]
    fn title_fallback_chain() {
        assert_eq!(
            extract_title("<title>Plain</title>"),
            Some("Plain".to_string())
        );
        assert_eq!(
            extract_title(r#"<title id="pageTitle">Paged</title>"#),
            Some("Paged".to_string())
        );
        assert_eq!(
            extract_title(r#"<meta property="og:title" content="Social" />"#),
            Some("Social".to_string())
        );
        assert_eq!(extract_title("<h1>nothing here</h1>"), None);
    }

    #[test]
    fn author_from_either_state_shape() {
        assert_eq!(
            extract_author(r#""ownerName":"Jane Doe""#),
            Some("Jane Doe".to_string())
        );
        assert_eq!(
            extract_author(r#""owner":{"__typename":"User","name":"John"}"#),
            Some("John".to_string())
        );
        assert_eq!(extract_author("no owner"), None);
    }

    #[test]
    fn duration_from_seconds_or_milliseconds() {
        assert_eq!(extract_duration_secs(r#""length_in_second":95"#), Some(95));
        assert_eq!(
            extract_duration_secs(r#""playable_duration_in_ms":95700"#),
            Some(95)
        );
        assert_eq!(extract_duration_secs("{}"), None);
    }

    #[test]
    fn metrics_default_to_zero() {
        let m = extract_metrics("nothing");
        assert_eq!(m, Metrics::default());

        let m = extract_metrics(r#""like_count":12,"comment_count":3,"share_count":{"count":7}"#);
        assert_eq!(m.likes, 12);
        assert_eq!(m.comments, 3);
        assert_eq!(m.shares, 7);
    }

    #[test]
    fn media_link_patterns() {
        let body = r#"browser_native_sd_url":"https:\/\/sd" browser_native_hd_url":"https:\/\/hd""#;
        assert_eq!(extract_sd_link(body), Some(r"https:\/\/sd".to_string()));
        assert_eq!(extract_hd_link(body), Some(r"https:\/\/hd".to_string()));
        assert_eq!(extract_generic_link(body), None);
    }
}
