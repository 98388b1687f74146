use crate::resolve::clean_quotes;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Where an enumerated part begins: a number at an ASCII word boundary
/// followed by `.`, `)`, whitespace or `-`. A digit right after a non-ASCII
/// letter such as `é` starts a part.
static PART_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[0-9]+[.)\s-]").expect("valid part start pattern")
});

static LEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[.)\s-]*").expect("valid leading marker pattern"));

static DASH_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*?)\s*[-–—]\s*(.*)$").expect("valid dash separator pattern")
});

static COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid comma pattern"));

/// One enumerated entry of a summary, e.g. `Rest - get enough sleep`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    /// Empty when no separator was found.
    pub title: String,
    pub description: String,
}

impl SummaryItem {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: clean_quotes(title),
            description: clean_quotes(description),
        }
    }
}

/// Split text into parts that each begin at a numeric marker. The marker
/// stays at the front of the part that follows it.
fn split_at_markers(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for m in PART_START.find_iter(text) {
        if m.start() > start {
            parts.push(&text[start..m.start()]);
        }
        start = m.start();
    }
    parts.push(&text[start..]);
    parts
}

/// Split one entry into title and description.
///
/// Tries the first hyphen, then any dash (hyphen, en or em dash) with
/// optional spacing, then the first comma. With no separator the title is
/// empty and the whole text is the description.
pub fn split_title(text: &str) -> SummaryItem {
    if let Some((title, description)) = text.split_once('-') {
        return SummaryItem::new(title, description);
    }

    if let Some(caps) = DASH_SEPARATOR.captures(text) {
        let title = caps.get(1).map_or("", |m| m.as_str());
        let description = caps.get(2).map_or("", |m| m.as_str());
        return SummaryItem::new(title, description);
    }

    let pieces: Vec<&str> = COMMA.split(text).collect();
    match pieces.split_first() {
        Some((title, rest)) if !rest.is_empty() => SummaryItem::new(title, &rest.join(", ")),
        _ => SummaryItem::new("", text),
    }
}

/// Decompose enumerated summary text into title/description items.
///
/// En and em dashes are normalized to hyphens, the text is split before
/// every numeric marker, the marker is stripped from each part and the
/// remainder is split with `split_title`. Parts that are empty once the
/// marker is gone produce nothing.
pub fn decompose(raw: &str) -> Vec<SummaryItem> {
    let normalized = raw.replace(['–', '—'], "-");

    split_at_markers(normalized.trim())
        .into_iter()
        .filter_map(|part| {
            let stripped = LEADING_MARKER.replace(part.trim(), "");
            let rest = stripped.trim();
            if rest.is_empty() {
                None
            } else {
                Some(split_title(rest))
            }
        })
        .collect()
}
