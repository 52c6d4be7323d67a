//! Response formatting: JSON prettifying and link segmentation

use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::sync::LazyLock;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("link pattern is valid"));

/// A run of response text, tagged with whether it is a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

impl<'a> Segment<'a> {
    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link(_))
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(s) | Segment::Link(s) => s,
        }
    }
}

/// Pretty-print `text` as JSON with 4-space indentation, keeping key order.
/// Text that is not JSON comes back unchanged.
pub fn prettify(text: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    let mut out = Vec::with_capacity(text.len() * 2);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    if json.serialize(&mut serializer).is_err() {
        return text.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| text.to_string())
}

/// Split `text` into plain and link segments that together cover all of it
pub fn extract_links(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for found in LINK_PATTERN.find_iter(text) {
        if found.start() > last_end {
            segments.push(Segment::Text(&text[last_end..found.start()]));
        }
        segments.push(Segment::Link(found.as_str()));
        last_end = found.end();
    }

    if last_end < text.len() {
        segments.push(Segment::Text(&text[last_end..]));
    }

    segments
}

/// First link in `text`, if any
pub fn first_link(text: &str) -> Option<&str> {
    LINK_PATTERN.find(text).map(|m| m.as_str())
}
