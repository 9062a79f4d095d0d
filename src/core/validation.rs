//! Source URL validation
//!
//! Gate for every inbound request: confirms the candidate URL actually
//! points at a Facebook video/reel/post/story page before any outbound
//! fetch is attempted. Whitelist-based, same approach as classic
//! yt-dlp-style URL validators.

use thiserror::Error;
use url::Url;

/// Path segments that identify a downloadable Facebook resource.
///
/// A URL must carry one of these in its path (or be hosted on `fb.watch`,
/// where the whole path is a share token) to pass validation.
pub const RESOURCE_SEGMENTS: &[&str] = &[
    "videos", "video", "reel", "reels", "posts", "post", "story", "stories", "watch",
];

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No URL was supplied at all
    #[error("Please provide the URL")]
    MissingUrl,

    /// Invalid URL format or non-Facebook domain
    #[error("Invalid Facebook URL: {0}")]
    InvalidUrl(String),

    /// Well-formed Facebook URL that doesn't point at a known resource type
    #[error("URL does not point at a video, reel, post or story: {0}")]
    UnrecognizedResource(String),
}

/// Validates that a URL points at a downloadable Facebook resource.
///
/// # Security
/// Uses whitelist approach:
/// - Only HTTP/HTTPS schemes allowed
/// - Only facebook.com (+ subdomains) and fb.watch domains
/// - Path must contain a recognized resource segment
///
/// Runs strictly before any network I/O — it is the sole defense against
/// wasted outbound fetches, not a security boundary (the remote site is
/// the actual gate).
///
/// # Examples
/// ```
/// use fbgrab::core::validation::validate_source_url;
///
/// // Valid URLs
/// assert!(validate_source_url("https://www.facebook.com/watch/videos/123456789").is_ok());
/// assert!(validate_source_url("https://facebook.com/reel/987654321").is_ok());
/// assert!(validate_source_url("https://m.facebook.com/story.php?story_fbid=1").is_err()); // "story.php" is not a path segment
/// assert!(validate_source_url("https://fb.watch/aBcDeF/").is_ok());
///
/// // Invalid URLs
/// assert!(validate_source_url("").is_err());
/// assert!(validate_source_url("not a url").is_err());
/// assert!(validate_source_url("https://evil.com/videos/123").is_err());
/// assert!(validate_source_url("ftp://facebook.com/videos/123").is_err());
/// assert!(validate_source_url("https://facebook.com/profile/someone").is_err());
/// ```
pub fn validate_source_url(url: &str) -> Result<Url, ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;

    // Only HTTP and HTTPS are allowed
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (invalid scheme: {})",
            url,
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ValidationError::InvalidUrl(format!("{} (no host)", url)))?;

    let is_facebook = host == "facebook.com" || host.ends_with(".facebook.com");
    let is_share_host = host == "fb.watch";

    if !is_facebook && !is_share_host {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (not a Facebook domain: {})",
            url, host
        )));
    }

    // fb.watch paths are opaque share tokens; any non-empty path passes
    if is_share_host {
        if parsed.path().trim_matches('/').is_empty() {
            return Err(ValidationError::UnrecognizedResource(url.to_string()));
        }
        return Ok(parsed);
    }

    let has_resource_segment = parsed
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .any(|s| RESOURCE_SEGMENTS.contains(&s))
        })
        .unwrap_or(false);

    if !has_resource_segment {
        return Err(ValidationError::UnrecognizedResource(url.to_string()));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_resource_segment_variants() {
        for segment in RESOURCE_SEGMENTS {
            let url = format!("https://www.facebook.com/{}/123456789", segment);
            assert!(validate_source_url(&url).is_ok(), "rejected {}", url);
        }
    }

    #[test]
    fn accepts_subdomains() {
        assert!(validate_source_url("https://m.facebook.com/videos/42").is_ok());
        assert!(validate_source_url("https://web.facebook.com/reel/42").is_ok());
    }

    #[test]
    fn rejects_missing_url() {
        assert!(matches!(
            validate_source_url(""),
            Err(ValidationError::MissingUrl)
        ));
        assert!(matches!(
            validate_source_url("   "),
            Err(ValidationError::MissingUrl)
        ));
    }

    #[test]
    fn rejects_foreign_domain_with_resource_path() {
        assert!(matches!(
            validate_source_url("https://fakebook.com/videos/123"),
            Err(ValidationError::InvalidUrl(_))
        ));
        // Suffix trickery: "evilfacebook.com" is not a facebook.com subdomain
        assert!(validate_source_url("https://evilfacebook.com/videos/123").is_err());
    }

    #[test]
    fn rejects_facebook_url_without_resource_segment() {
        assert!(matches!(
            validate_source_url("https://www.facebook.com/groups/rustlang"),
            Err(ValidationError::UnrecognizedResource(_))
        ));
    }

    #[test]
    fn rejects_bare_share_host() {
        assert!(validate_source_url("https://fb.watch/").is_err());
        assert!(validate_source_url("https://fb.watch/xYz123/").is_ok());
    }
}
