//! Response rendering
//!
//! Serializes the assembled record in the negotiated output format. JSON
//! is the default; XML is produced from the same record through quick-xml.
//! Either path that fails falls back to an explicit failure payload —
//! a render problem must never reach the transport layer as an unhandled
//! error.

use std::io;
use std::str::FromStr;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::extract::ExtractionResult;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Requested output format; JSON unless the caller asked for XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(()),
        }
    }
}

/// Serialize `record` in the requested format.
///
/// Returns the content type alongside the body. Never fails: a broken
/// serialization is replaced by a minimal failure payload in the same
/// format.
pub fn render(record: &ExtractionResult, format: OutputFormat) -> (&'static str, String) {
    match format {
        OutputFormat::Json => (JSON_CONTENT_TYPE, render_json(record)),
        OutputFormat::Xml => (XML_CONTENT_TYPE, render_xml(record)),
    }
}

fn render_json(record: &ExtractionResult) -> String {
    serde_json::to_string(record).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize record as JSON: {}", e);
        r#"{"success":false,"message":"Failed to serialize response"}"#.to_string()
    })
}

fn render_xml(record: &ExtractionResult) -> String {
    write_xml(record).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize record as XML: {}", e);
        "<response><success>false</success>\
         <message>Failed to serialize response</message></response>"
            .to_string()
    })
}

fn write_xml(record: &ExtractionResult) -> Result<String, Box<dyn std::error::Error>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    writer.write_event(Event::Start(BytesStart::new("response")))?;

    write_text_element(&mut writer, "success", &record.success.to_string())?;
    write_text_element(&mut writer, "id", &record.id)?;
    if let Some(ref title) = record.title {
        write_text_element(&mut writer, "title", title)?;
    }
    if let Some(ref author) = record.author {
        write_text_element(&mut writer, "author", author)?;
    }
    write_text_element(&mut writer, "published_at", &record.published_at)?;
    if let Some(ref thumbnail) = record.thumbnail {
        write_text_element(&mut writer, "thumbnail", thumbnail)?;
    }
    write_text_element(&mut writer, "duration", &record.duration)?;

    writer.write_event(Event::Start(BytesStart::new("metrics")))?;
    write_text_element(&mut writer, "likes", &record.metrics.likes.to_string())?;
    write_text_element(&mut writer, "comments", &record.metrics.comments.to_string())?;
    write_text_element(&mut writer, "shares", &record.metrics.shares.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("metrics")))?;

    writer.write_event(Event::Start(BytesStart::new("links")))?;
    for link in &record.links {
        let mut start = BytesStart::new("link");
        start.push_attribute(("label", link.label.as_str()));
        writer.write_event(Event::Start(start))?;
        write_text_element(&mut writer, "url", &link.url)?;
        write_text_element(&mut writer, "resolution", &format!("{:?}", link.resolution))?;
        if let Some(kb) = link.estimated_size_kb {
            write_text_element(&mut writer, "estimated_size_kb", &kb.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("link")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("links")))?;

    if let Some(ref message) = record.message {
        write_text_element(&mut writer, "message", message)?;
    }

    writer.write_event(Event::End(BytesEnd::new("response")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_text_element<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
