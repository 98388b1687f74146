use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ===================================================================
// Search response (received via stdin, snake_case JSON)
// ===================================================================

/// Top-level response from the medical search service.
///
/// Every field is optional and `null` is accepted anywhere a value can be
/// missing. Unknown fields are ignored, and pass-through fields holding a
/// value of the wrong type are treated as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub sql_command: Option<String>,
    #[serde(default)]
    pub details: Option<Details>,
}

/// `details` is normally a list, but the service occasionally returns a
/// single record. Both are accepted; a single record is treated as a
/// one-element list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Details {
    Many(Vec<DetailItem>),
    One(Box<DetailItem>),
}

impl ApiResponse {
    /// The first detail record, which is the only one the view uses.
    pub fn first_detail(&self) -> Option<&DetailItem> {
        match self.details.as_ref()? {
            Details::Many(items) => items.first(),
            Details::One(item) => Some(item),
        }
    }
}

// ===================================================================
// Detail record
// ===================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailItem {
    #[serde(default, deserialize_with = "lenient")]
    pub disease_name: Option<String>,
    #[serde(default)]
    pub summary_pdf: Option<RawSummary>,
    #[serde(default)]
    pub summary_csv: Option<RawSummary>,
    /// Opaque, passed through to the output untouched.
    #[serde(default)]
    pub details_chunks: Option<Value>,
    /// A list of entries, a stringified list, or a delimited string. Parsed
    /// by `names::build_cards`.
    #[serde(default)]
    pub tests_details: Option<Value>,
    /// Entries that are not objects are dropped.
    #[serde(default, deserialize_with = "lenient_list")]
    pub related_images: Option<Vec<RelatedImage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RelatedImage {
    #[serde(default, deserialize_with = "lenient")]
    pub caption_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub disease_image_base64: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_page_num: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name_distance: Option<f64>,
}

// ===================================================================
// RawSummary: the loosely-typed summary field
// ===================================================================

/// A summary field as the service sends it.
///
/// The generator is inconsistent: the same field can hold a plain string,
/// a list of lines, or an object wrapping either of those. Anything else
/// (numbers, booleans) is kept as `Other` so the rest of the response still
/// deserializes; it resolves to "no value".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawSummary {
    Text(String),
    Lines(Vec<Value>),
    Wrapped(SummaryEnvelope),
    Other(Value),
}

/// The `{ summary, source }` object form of a summary field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub summary: Option<Box<RawSummary>>,
    /// Scalars are kept as their text so an odd `source` never hides the
    /// summary it wraps.
    #[serde(default, deserialize_with = "lenient_label")]
    pub source: Option<String>,
    /// Page references; only the PDF summary carries these.
    #[serde(default)]
    pub pages: Option<Value>,
}

impl RawSummary {
    /// The wrapping object, when the field used the object form.
    pub fn envelope(&self) -> Option<&SummaryEnvelope> {
        match self {
            Self::Wrapped(env) => Some(env),
            _ => None,
        }
    }

    /// `source` of the wrapping object, if any.
    pub fn source(&self) -> Option<&str> {
        self.envelope().and_then(|env| env.source.as_deref())
    }
}

// ===================================================================
// Tolerant field deserializers
// ===================================================================

/// Deserialize an optional field, treating a value of the wrong type as
/// missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::debug!(error = %e, "field has an unexpected type; treating as missing");
            Ok(None)
        }
    }
}

/// Like `lenient`, for lists: a non-list is missing and elements that do
/// not fit are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(Some(
            values
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        )),
        Value::Null => Ok(None),
        other => {
            tracing::debug!(value = %other, "expected a list; treating as missing");
            Ok(None)
        }
    }
}

/// A label field: strings as-is, numbers and booleans as their text.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
