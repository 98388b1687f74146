use crate::types::RawSummary;
use regex::Regex;
use std::sync::LazyLock;

/// The token the upstream generator writes in place of `null`.
pub const NIL_TOKEN: &str = "NIL";

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("valid line break pattern"));

/// True if `value` is the sentinel token once trimmed and upper-cased
/// (Unicode case mapping, so `nıl` counts).
pub fn is_nil_token(value: &str) -> bool {
    value.trim().to_uppercase() == NIL_TOKEN
}

/// Strip wrapping single/double quotes and surrounding whitespace.
///
/// Quote runs and whitespace are removed together, so `' "CBC" '` becomes
/// `CBC` and applying this twice is the same as applying it once.
pub fn clean_quotes(value: &str) -> String {
    value
        .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
        .to_string()
}

/// Text of one element of a list-shaped summary. Scalars are stringified,
/// nested lists and objects are skipped.
fn element_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Clean the elements of a list-shaped summary: sentinel elements are
/// dropped, the rest are quote-cleaned and blank results discarded.
fn clean_elements(elements: &[serde_json::Value]) -> Vec<String> {
    elements
        .iter()
        .filter_map(element_text)
        .filter(|s| !is_nil_token(s))
        .map(|s| clean_quotes(&s))
        .filter(|s| !s.is_empty())
        .collect()
}

impl RawSummary {
    /// Canonical raw string for this summary, or `None` if it carries no
    /// value.
    ///
    /// A wrapping object is resolved through its `summary` field; a list is
    /// cleaned and joined with newlines.
    pub fn resolve_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || is_nil_token(trimmed) {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Lines(elements) => {
                let lines = clean_elements(elements);
                if lines.is_empty() { None } else { Some(lines.join("\n")) }
            }
            Self::Wrapped(env) => env.summary.as_deref().and_then(RawSummary::resolve_text),
            Self::Other(value) => {
                tracing::trace!(%value, "summary has an unsupported shape; treating as absent");
                None
            }
        }
    }

    /// Canonical list for this summary, only when the source was a list.
    /// A plain string resolves to `None` here even when it has content.
    pub fn resolve_lines(&self) -> Option<Vec<String>> {
        match self {
            Self::Lines(elements) => {
                let lines = clean_elements(elements);
                if lines.is_empty() { None } else { Some(lines) }
            }
            Self::Wrapped(env) => env.summary.as_deref().and_then(RawSummary::resolve_lines),
            Self::Text(_) | Self::Other(_) => None,
        }
    }
}

/// Split resolved summary text into trimmed, non-blank lines.
pub fn summary_lines(text: &str) -> Vec<String> {
    LINE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests;
