use crate::items::{SummaryItem, decompose};
use crate::names::{TestCard, build_cards};
use crate::resolve::summary_lines;
use crate::summary::{NormalizedSummary, normalize_summary};
use crate::types::{ApiResponse, DetailItem, RawSummary, RelatedImage};
use serde::Serialize;
use serde_json::Value;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Try giving another query.";

// ===================================================================
// Output: what the renderer receives
// ===================================================================

/// Normalized view of one search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchView {
    /// No detail record, or neither summary has any content.
    NoResults {
        message: String,
        sql_command: Option<String>,
    },
    Results(ResultView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub sql_command: Option<String>,
    pub disease_name: Option<String>,
    pub summary_csv: Option<SummarySection>,
    pub summary_pdf: Option<SummarySection>,
    pub tests: Option<Vec<TestCard>>,
    pub related_images: Vec<RelatedImage>,
    /// Passed through untouched.
    pub details_chunks: Option<Value>,
}

/// Everything the renderer needs for one summary field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySection {
    pub source: Option<String>,
    /// Canonical raw text (list summaries joined with newlines).
    pub text: String,
    /// `text` split into non-blank lines.
    pub lines: Vec<String>,
    /// Cleaned elements, only when the service sent a list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    pub normalized: NormalizedSummary,
    pub items: Vec<SummaryItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageRef>,
}

/// A page reference attached to the PDF summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageRef {
    Number(serde_json::Number),
    Label(String),
}

// ===================================================================
// Pure entry point
// ===================================================================

/// Normalize a search response into the view the renderer consumes.
pub fn build_view(response: &ApiResponse) -> SearchView {
    let sql_command = response.sql_command.clone();

    let Some(detail) = response.first_detail() else {
        tracing::debug!("response has no detail records");
        return no_results(sql_command);
    };

    let summary_csv = build_section(detail.summary_csv.as_ref());
    let summary_pdf = build_section(detail.summary_pdf.as_ref()).map(|mut section| {
        section.pages = pdf_pages(detail);
        section
    });

    if summary_csv.is_none() && summary_pdf.is_none() {
        tracing::debug!("neither summary has content after sentinel resolution");
        return no_results(sql_command);
    }

    let tests = build_cards(detail.tests_details.as_ref());

    SearchView::Results(ResultView {
        sql_command,
        disease_name: detail.disease_name.clone(),
        summary_csv,
        summary_pdf,
        tests,
        related_images: detail.related_images.clone().unwrap_or_default(),
        details_chunks: detail.details_chunks.clone(),
    })
}

fn no_results(sql_command: Option<String>) -> SearchView {
    SearchView::NoResults {
        message: NO_RESULTS_MESSAGE.to_string(),
        sql_command,
    }
}

/// Resolve and normalize one summary field. `None` when it has no content.
fn build_section(raw: Option<&RawSummary>) -> Option<SummarySection> {
    let raw = raw?;
    let text = raw.resolve_text()?;
    let normalized = normalize_summary(Some(&text));
    if !normalized.has_content() {
        return None;
    }

    Some(SummarySection {
        source: raw.source().map(String::from),
        lines: summary_lines(&text),
        list: raw.resolve_lines(),
        normalized,
        items: decompose(&text),
        pages: Vec::new(),
        text,
    })
}

/// Page references of the PDF summary: numbers stay numbers, anything else
/// becomes a label; a single value becomes a one-element list.
fn pdf_pages(detail: &DetailItem) -> Vec<PageRef> {
    let pages = detail
        .summary_pdf
        .as_ref()
        .and_then(RawSummary::envelope)
        .and_then(|env| env.pages.as_ref());

    match pages {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values.iter().map(page_ref).collect(),
        Some(other) => vec![PageRef::Label(value_label(other))],
    }
}

fn page_ref(value: &Value) -> PageRef {
    match value {
        Value::Number(n) => PageRef::Number(n.clone()),
        other => PageRef::Label(value_label(other)),
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
