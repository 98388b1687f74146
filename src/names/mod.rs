use crate::resolve::clean_quotes;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// A bare or inconsistently quoted run followed by `,` or `]`. The
/// delimiter is captured so the replacement can put it back.
static UNQUOTED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(['"])?([A-Za-z0-9\s\-_/()]+)(['"])?(\s*[,\]])"#)
        .expect("valid unquoted run pattern")
});

/// One token of a bracketed list body: a double-quoted run, a
/// single-quoted run, or anything up to the next comma.
static LIST_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*(?:"([^"]*)"\s*(?:,|$)|'([^']*)'\s*(?:,|$)|([^,]+)(?:,|$))"#)
        .expect("valid list token pattern")
});

static NAME_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,;•\n]\s*").expect("valid name delimiter pattern"));

/// A group of related test names with an optional relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCard {
    pub score: Option<f64>,
    /// Never empty.
    pub names: Vec<String>,
}

// ===================================================================
// Name-list parsing
// ===================================================================

/// A strategy for the body of a bracketed list. `None` means the strategy
/// found nothing and the next one should be tried.
type ListStrategy = fn(&str) -> Option<Vec<String>>;

/// Tried in order on strings that look like `[...]`; first non-empty
/// result wins.
const BRACKETED_STRATEGIES: &[(&str, ListStrategy)] = &[
    ("repair_and_parse", repair_and_parse),
    ("extract_tokens", extract_tokens),
];

/// Parse a field holding test or entity names into a clean ordered list.
///
/// Accepts a real list (string elements only), a stringified list with
/// missing or mixed quoting, or a delimited string. Any other value becomes
/// a one-element list of its JSON text. Never fails.
pub fn parse_names(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(elements) => elements
            .iter()
            .filter_map(Value::as_str)
            .map(clean_quotes)
            .collect(),
        Value::String(s) => parse_name_string(s),
        other => vec![other.to_string()],
    }
}

/// Parse names out of a single string.
///
/// Unlike a plain split, a string that is blank once cleaned (`""`, `' '`)
/// yields no names at all rather than one empty name, so a card is never
/// built around an empty name.
pub fn parse_name_string(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Vec::new();
    }

    if s.len() >= 2 && s.starts_with('[') && s.ends_with(']') {
        if s[1..s.len() - 1].trim().is_empty() {
            return Vec::new();
        }
        for (name, strategy) in BRACKETED_STRATEGIES {
            if let Some(names) = strategy(s) {
                tracing::trace!(strategy = name, count = names.len(), "parsed bracketed name list");
                return names;
            }
            tracing::debug!(strategy = name, "bracketed name list strategy found nothing");
        }
    }

    split_names(s)
}

/// Quote every bare run, then parse the result as a JSON array.
fn repair_and_parse(s: &str) -> Option<Vec<String>> {
    let repaired = UNQUOTED_RUN.replace_all(s, r#""${2}"${4}"#);
    let parsed: Vec<Value> = match serde_json::from_str(&repaired) {
        Ok(values) => values,
        Err(e) => {
            tracing::debug!(error = %e, repaired = %repaired, "repaired name list is not valid JSON");
            return None;
        }
    };
    non_empty(
        parsed
            .iter()
            .map(|v| match v {
                Value::String(s) => clean_quotes(s),
                other => clean_quotes(&other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Pull quoted or unquoted tokens out of the list body one at a time.
fn extract_tokens(s: &str) -> Option<Vec<String>> {
    let body = s.strip_prefix('[')?.strip_suffix(']')?;
    non_empty(
        LIST_TOKEN
            .captures_iter(body)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| clean_quotes(m.as_str()))
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Split on commas, semicolons, bullets and newlines. A string with a
/// single piece is returned whole.
fn split_names(s: &str) -> Vec<String> {
    let pieces: Vec<&str> = NAME_DELIMITER
        .split(s)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let names: Vec<String> = if pieces.len() > 1 {
        pieces.into_iter().map(clean_quotes).collect()
    } else {
        vec![clean_quotes(s)]
    };
    names.into_iter().filter(|n| !n.is_empty()).collect()
}

fn non_empty(names: Vec<String>) -> Option<Vec<String>> {
    if names.is_empty() { None } else { Some(names) }
}

// ===================================================================
// Test cards
// ===================================================================

/// Build test cards from a `tests_details` field.
///
/// A list yields one card per entry that has at least one name; a string
/// yields a single unscored card. Returns `None` when there is nothing to
/// render.
pub fn build_cards(raw: Option<&Value>) -> Option<Vec<TestCard>> {
    let cards: Vec<TestCard> = match raw? {
        Value::Array(entries) => entries.iter().filter_map(card_from_entry).collect(),
        Value::String(s) => {
            let names = parse_name_string(s);
            if names.is_empty() {
                Vec::new()
            } else {
                vec![TestCard { score: None, names }]
            }
        }
        Value::Null => return None,
        other => {
            tracing::debug!(value = %other, "tests_details has an unsupported shape; ignoring");
            return None;
        }
    };

    if cards.is_empty() { None } else { Some(cards) }
}

fn card_from_entry(entry: &Value) -> Option<TestCard> {
    let score = entry.get("score").and_then(Value::as_f64);
    let names = parse_names(name_source(entry));
    if names.is_empty() {
        None
    } else {
        Some(TestCard { score, names })
    }
}

/// `test_name`, else `name`, else the entry itself.
fn name_source(entry: &Value) -> &Value {
    ["test_name", "name"]
        .into_iter()
        .filter_map(|key| entry.get(key))
        .find(|v| !v.is_null())
        .unwrap_or(entry)
}
