//! Normalization of raw extraction matches
//!
//! Raw captures come straight out of inline JSON state, so they still
//! carry backslash escapes and CDN bookkeeping. Everything here is pure
//! and fails closed: a value that can't be decoded is reported as absent,
//! never as an error.

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

/// Decode a JSON string literal body (the part between the quotes).
///
/// Uses serde_json's own string parser rather than a bespoke unescape so
/// `\uXXXX` sequences, surrogate pairs, and escaped slashes all decode
/// exactly as the page intended. A malformed literal yields `None`.
///
/// Raw captures can't contain an unescaped `"` (the patterns stop at one),
/// but reject it anyway so the literal wrapper can't be broken out of.
pub fn unescape_json_str(raw: &str) -> Option<String> {
    if raw.contains('"') {
        return None;
    }
    serde_json::from_str(&format!("\"{}\"", raw)).ok()
}

/// Strip every character outside the alphanumeric-and-whitespace set and
/// trim. Presentation hygiene, not a security boundary.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Estimate the media file size in KB from a size-bearing query parameter.
///
/// Two parameter conventions exist across page variants: a decimal byte
/// count under `filesize`/`size`/`content_length`, and a hex byte count
/// under `sz`. Decimal is tried first. Result is rounded to the nearest
/// kilobyte; absent or unparsable parameters yield `None`.
pub fn estimate_size_kb(url: &str) -> Option<u64> {
    let parsed = Url::parse(url).ok()?;

    for (key, value) in parsed.query_pairs() {
        if matches!(key.as_ref(), "filesize" | "size" | "content_length") {
            if let Ok(bytes) = value.parse::<u64>() {
                return Some(bytes_to_kb(bytes));
            }
        }
    }

    for (key, value) in parsed.query_pairs() {
        if key == "sz" {
            if let Ok(bytes) = u64::from_str_radix(value.as_ref(), 16) {
                return Some(bytes_to_kb(bytes));
            }
        }
    }

    None
}

fn bytes_to_kb(bytes: u64) -> u64 {
    // Saturate: the byte count comes from remote markup and may be anything
    bytes.saturating_add(512) / 1024
}

/// Convert an epoch-seconds publish time to an ISO-8601 instant.
/// Out-of-range timestamps yield `None`.
pub fn epoch_to_iso8601(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Format whole seconds as a human-readable "Xm Ys" duration.
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Append the download-disposition flag the way the original page links
/// expect it (`&dl=1`, or `?dl=1` when the URL has no query yet).
pub fn with_download_flag(url: &str) -> String {
    if url.contains('?') {
        format!("{}&dl=1", url)
    } else {
        format!("{}?dl=1", url)
    }
}
