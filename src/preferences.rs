use crate::render::{DEFAULT_TEXT_TEMPLATE, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Looked up in the working directory when `--config` is not given.
pub const FILENAME: &str = "mediq-normalizer.toml";

/// Template for `--format text`: either an inline minijinja string or a
/// path to a template file (relative to the preferences file).
///
/// In TOML this looks like one of:
///
/// ```toml
/// [text_template]
/// inline = "{{ view.disease_name }}"
///
/// # or
///
/// [text_template]
/// file = "summary.j2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TextTemplate {
    /// An inline minijinja template string.
    Inline(String),
    /// Path to a template file (relative to the preferences file).
    File(String),
}

impl Default for TextTemplate {
    fn default() -> Self {
        TextTemplate::Inline(DEFAULT_TEXT_TEMPLATE.into())
    }
}

/// User-facing preferences stored in `mediq-normalizer.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Preferences {
    /// Options: "json", "text". Anything else means json.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,

    /// Template used for text output.
    #[serde(default)]
    pub text_template: TextTemplate,
}

fn default_output_format() -> String {
    "json".into()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            pretty: false,
            text_template: TextTemplate::default(),
        }
    }
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file means all defaults. Missing keys in an existing file
    /// are filled in with defaults via serde.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let prefs: Preferences = toml::from_str(&contents)
                    .with_context(|| format!("parsing {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded preferences");
                Ok(prefs)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences file; using defaults");
                Ok(Preferences::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.output_format.as_str() {
            "text" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }

    /// Resolve the text template to a string. File templates are read
    /// relative to `base_dir`.
    pub fn load_text_template(&self, base_dir: &Path) -> Result<String> {
        match &self.text_template {
            TextTemplate::Inline(s) => Ok(s.clone()),
            TextTemplate::File(rel) => {
                let path = base_dir.join(rel);
                fs::read_to_string(&path)
                    .with_context(|| format!("reading template {}", path.display()))
            }
        }
    }
}
