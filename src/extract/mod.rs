//! Field extraction and result assembly
//!
//! Turns a fetched page body plus the source URL into an [`ExtractionResult`].
//! Every rule in [`rules`] is pure and total: it either matches or reports
//! absence, and absence degrades to a documented placeholder instead of
//! failing the request. The only thing that flips the overall `success`
//! flag to false is finding zero media links, because a record without a
//! download link is useless to the caller.

pub mod normalize;
pub mod rules;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// Label for the standard-quality download link
pub const LABEL_SD: &str = "Download Low Quality";
/// Label for the high-quality download link
pub const LABEL_HD: &str = "Download High Quality";
/// Label for the generic fallback link used when neither SD nor HD matched
pub const LABEL_GENERIC: &str = "Download";

/// Placeholder for an absent publish time
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for an absent duration
pub const UNKNOWN_DURATION: &str = "Unknown duration";

/// Media resolution of a download link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    SD,
    HD,
    Unknown,
}

/// A single downloadable media link with its quality label.
///
/// Serialized as one entry of the `links` map, keyed by `label`, so the
/// JSON shape matches what API consumers expect:
/// `{"Download Low Quality": {"url": …, "resolution": "SD", …}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLink {
    pub label: String,
    pub url: String,
    pub resolution: Resolution,
    pub estimated_size_kb: Option<u64>,
}

/// Map-value side of a [`QualityLink`] (everything except the label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub url: String,
    pub resolution: Resolution,
    #[serde(default)]
    pub estimated_size_kb: Option<u64>,
}

/// Presentational engagement counters; each defaults to 0 when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// The assembled response record for one source URL.
///
/// `links` keeps insertion order (SD before HD before generic) because
/// callers may display the entries positionally. Once constructed the
/// record is immutable; the cache hands out clones, never references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub duration: String,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(
        default,
        serialize_with = "serialize_links",
        deserialize_with = "deserialize_links"
    )]
    pub links: Vec<QualityLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            success: false,
            id: String::new(),
            title: None,
            author: None,
            published_at: UNKNOWN.to_string(),
            thumbnail: None,
            duration: UNKNOWN_DURATION.to_string(),
            metrics: Metrics::default(),
            links: Vec::new(),
            message: None,
        }
    }
}

impl ExtractionResult {
    /// Build a failure record with a human-readable reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// True when the record carries a high-quality link. Drives the
    /// shorter cache TTL for HD entries.
    pub fn has_hd_link(&self) -> bool {
        self.links.iter().any(|l| l.resolution == Resolution::HD)
    }
}

fn serialize_links<S>(links: &[QualityLink], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(links.len()))?;
    for link in links {
        map.serialize_entry(
            &link.label,
            &LinkInfo {
                url: link.url.clone(),
                resolution: link.resolution,
                estimated_size_kb: link.estimated_size_kb,
            },
        )?;
    }
    map.end()
}

fn deserialize_links<'de, D>(deserializer: D) -> Result<Vec<QualityLink>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LinksVisitor;

    impl<'de> Visitor<'de> for LinksVisitor {
        type Value = Vec<QualityLink>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of quality label to link info")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut links = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((label, info)) = access.next_entry::<String, LinkInfo>()? {
                links.push(QualityLink {
                    label,
                    url: info.url,
                    resolution: info.resolution,
                    estimated_size_kb: info.estimated_size_kb,
                });
            }
            Ok(links)
        }
    }

    deserializer.deserialize_map(LinksVisitor)
}

/// Run every extraction rule against the fetched body and assemble the
/// normalized record.
///
/// Pure function: the same URL and body always produce the same record,
/// so re-running extraction is free of side effects and idempotent.
pub fn extract_record(url: &Url, body: &str) -> ExtractionResult {
    let id = rules::extract_id(url).unwrap_or_default();

    let title = rules::extract_title(body)
        .and_then(|raw| normalize::unescape_json_str(&raw))
        .map(|t| normalize::sanitize_title(&t))
        .filter(|t| !t.is_empty());

    let author = rules::extract_author(body).and_then(|raw| normalize::unescape_json_str(&raw));

    let published_at = rules::extract_publish_time(body)
        .and_then(normalize::epoch_to_iso8601)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let thumbnail = rules::extract_thumbnail(body).and_then(|raw| normalize::unescape_json_str(&raw));

    let duration = rules::extract_duration_secs(body)
        .map(normalize::format_duration)
        .unwrap_or_else(|| UNKNOWN_DURATION.to_string());

    let metrics = rules::extract_metrics(body);

    let mut links = Vec::new();
    if let Some(sd) = decoded_link(rules::extract_sd_link(body)) {
        links.push(quality_link(LABEL_SD, sd, Resolution::SD));
    }
    if let Some(hd) = decoded_link(rules::extract_hd_link(body)) {
        links.push(quality_link(LABEL_HD, hd, Resolution::HD));
    }
    // Last resort only: a generic playable URL when neither SD nor HD matched
    if links.is_empty() {
        if let Some(generic) = decoded_link(rules::extract_generic_link(body)) {
            links.push(quality_link(LABEL_GENERIC, generic, Resolution::Unknown));
        }
    }

    let success = !links.is_empty();
    let message = if success {
        None
    } else {
        Some("No downloadable media links found on the page".to_string())
    };

    ExtractionResult {
        success,
        id,
        title,
        author,
        published_at,
        thumbnail,
        duration,
        metrics,
        links,
        message,
    }
}

fn decoded_link(raw: Option<String>) -> Option<String> {
    raw.as_deref().and_then(normalize::unescape_json_str)
}

fn quality_link(label: &str, url: String, resolution: Resolution) -> QualityLink {
    let url = normalize::with_download_flag(&url);
    let estimated_size_kb = normalize::estimate_size_kb(&url);
    QualityLink {
        label: label.to_string(),
        url,
        resolution,
        estimated_size_kb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watch_url() -> Url {
        Url::parse("https://www.facebook.com/watch/videos/123456789").unwrap()
    }

    #[test]
    fn sd_only_body_yields_single_sd_link() {
        let body = r#"junk browser_native_sd_url":"https:\/\/x\/video.mp4" junk"#;
        let record = extract_record(&watch_url(), body);

        assert!(record.success);
        assert_eq!(record.links.len(), 1);
        assert_eq!(record.links[0].label, LABEL_SD);
        assert_eq!(record.links[0].resolution, Resolution::SD);
        assert_eq!(record.links[0].url, "https://x/video.mp4?dl=1");
    }

    #[test]
    fn sd_inserted_before_hd() {
        let body = concat!(
            r#"browser_native_hd_url":"https://x/hd.mp4?a=1""#,
            r#" browser_native_sd_url":"https://x/sd.mp4?a=1""#,
        );
        let record = extract_record(&watch_url(), body);

        assert_eq!(record.links.len(), 2);
        assert_eq!(record.links[0].resolution, Resolution::SD);
        assert_eq!(record.links[1].resolution, Resolution::HD);
        assert_eq!(record.links[1].url, "https://x/hd.mp4?a=1&dl=1");
    }

    #[test]
    fn generic_link_used_only_as_last_resort() {
        let body = r#""playable_url":"https://x/generic.mp4""#;
        let record = extract_record(&watch_url(), body);
        assert_eq!(record.links.len(), 1);
        assert_eq!(record.links[0].label, LABEL_GENERIC);
        assert_eq!(record.links[0].resolution, Resolution::Unknown);

        let body_with_sd = concat!(
            r#"browser_native_sd_url":"https://x/sd.mp4""#,
            r#" "playable_url":"https://x/generic.mp4""#,
        );
        let record = extract_record(&watch_url(), body_with_sd);
        assert_eq!(record.links.len(), 1);
        assert_eq!(record.links[0].resolution, Resolution::SD);
    }

    #[test]
    fn no_links_means_failure_but_metadata_survives() {
        let body = "<title>A Nice Video</title> no media here";
        let record = extract_record(&watch_url(), body);

        assert!(!record.success);
        assert!(record.message.as_deref().is_some_and(|m| !m.is_empty()));
        assert_eq!(record.title.as_deref(), Some("A Nice Video"));
        assert_eq!(record.id, "123456789");
    }

    #[test]
    fn missing_publish_time_degrades_to_unknown() {
        let body = r#"browser_native_sd_url":"https://x/v.mp4""#;
        let record = extract_record(&watch_url(), body);
        assert_eq!(record.published_at, UNKNOWN);
        assert_eq!(record.duration, UNKNOWN_DURATION);
    }

    #[test]
    fn extraction_is_idempotent() {
        let body = concat!(
            "<title>Some \\u0041 Video</title> ",
            r#""publish_time":1700000000 "#,
            r#""length_in_second":95 "#,
            r#"browser_native_sd_url":"https:\/\/cdn\/v.mp4?size=2048""#,
        );
        let first = extract_record(&watch_url(), body);
        let second = extract_record(&watch_url(), body);
        assert_eq!(first, second);
    }

    #[test]
    fn json_round_trip_preserves_record_and_link_order() {
        let body = concat!(
            r#"browser_native_sd_url":"https://x/sd.mp4""#,
            r#" browser_native_hd_url":"https://x/hd.mp4""#,
        );
        let record = extract_record(&watch_url(), body);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.links[0].label, LABEL_SD);
        assert_eq!(parsed.links[1].label, LABEL_HD);
    }
}
