use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A period further than this many characters into the text does not end
/// a heading; a long unbroken sentence is body text.
pub const HEADING_PERIOD_LIMIT: usize = 80;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("valid line break pattern"));

/// A list marker preceded by whitespace or the start of the text, e.g.
/// " 1. ", "\n2) ", " 3- ", " 4 ".
static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)[0-9]+[.)\-]?\s+").expect("valid number marker pattern"));

static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,;•]\s*").expect("valid delimiter pattern"));

// ===================================================================
// Output value objects
// ===================================================================

/// A narrative summary broken into an optional heading and a list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedSummary {
    pub heading: Option<String>,
    pub items: Vec<String>,
    /// True when the items came from a numbered list, so the renderer
    /// should supply its own markers.
    pub numbered: bool,
}

impl NormalizedSummary {
    pub fn has_content(&self) -> bool {
        self.heading.is_some() || !self.items.is_empty()
    }
}

/// Result of `split_heading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSplit {
    pub heading: Option<String>,
    /// Remaining text with newlines collapsed to spaces, trimmed.
    pub body: String,
}

/// Result of `segment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    pub items: Vec<String>,
    pub numbered: bool,
}

// ===================================================================
// Heading / body split
// ===================================================================

/// Separate a leading heading from the rest of the summary.
///
/// First match wins: text before the first colon, else before the first
/// newline, else up to and including a period that starts fewer than
/// `HEADING_PERIOD_LIMIT` characters in. Otherwise there is no heading.
pub fn split_heading(raw: &str) -> HeadingSplit {
    let (heading, rest) = if let Some(idx) = raw.find(':') {
        (Some(&raw[..idx]), &raw[idx + 1..])
    } else if let Some(idx) = raw.find('\n') {
        (Some(&raw[..idx]), &raw[idx + 1..])
    } else {
        match raw.find('.') {
            Some(idx) if raw[..idx].chars().count() < HEADING_PERIOD_LIMIT => {
                (Some(&raw[..=idx]), &raw[idx + 1..])
            }
            _ => (None, raw),
        }
    };

    let heading = heading
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from);
    let body = LINE_BREAK.replace_all(rest, " ").trim().to_string();

    HeadingSplit { heading, body }
}

// ===================================================================
// List segmentation
// ===================================================================

/// True if the body contains whitespace-framed numeric list markers.
pub fn is_numbered(body: &str) -> bool {
    NUMBER_MARKER.is_match(body)
}

/// Split a summary body into list items.
///
/// Numbered mode splits at each numeric marker and drops the markers.
/// Otherwise the body is split on commas, semicolons and bullets; if that
/// produces fewer than two pieces the whole body is one item.
pub fn segment(body: &str) -> Segmented {
    if is_numbered(body) {
        let items = NUMBER_MARKER
            .split(body)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        return Segmented { items, numbered: true };
    }

    let pieces: Vec<String> = DELIMITER
        .split(body)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let items = if pieces.len() > 1 {
        pieces
    } else {
        let whole = body.trim();
        if whole.is_empty() { Vec::new() } else { vec![whole.to_string()] }
    };
    Segmented { items, numbered: false }
}

/// Heading split followed by segmentation. Absent or blank input yields an
/// empty summary.
pub fn normalize_summary(raw: Option<&str>) -> NormalizedSummary {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return NormalizedSummary::default(),
    };

    let HeadingSplit { heading, body } = split_heading(raw);
    let Segmented { items, numbered } = segment(&body);
    tracing::trace!(
        has_heading = heading.is_some(),
        items = items.len(),
        numbered,
        "normalized summary"
    );

    NormalizedSummary { heading, items, numbered }
}
