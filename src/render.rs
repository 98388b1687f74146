use crate::view::SearchView;
use anyhow::{Context, Result};
use minijinja::{Environment, context};

/// How the view is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The view serialized as JSON.
    Json,
    /// The view rendered through the text template.
    Text,
}

/// Built-in text template. The view is available as `view`.
pub const DEFAULT_TEXT_TEMPLATE: &str = r#"{%- macro section(title, s) -%}
== {{ title }}{% if s.source %} ({{ s.source }}){% endif %} ==
{% if s.normalized.heading %}{{ s.normalized.heading }}
{% endif -%}
{% for item in s.normalized.items -%}
{% if s.normalized.numbered %}{{ loop.index }}. {% else %}- {% endif %}{{ item }}
{% endfor -%}
{%- endmacro -%}
{%- if view.status == "no_results" -%}
{{ view.message }}
{%- else -%}
{% if view.disease_name %}# {{ view.disease_name }}

{% endif -%}
{% if view.summary_csv %}{{ section("Summary", view.summary_csv) }}
{% endif -%}
{% if view.summary_pdf %}{{ section("Document summary", view.summary_pdf) }}
{% endif -%}
{% if view.tests %}== Tests ==
{% for card in view.tests -%}
- {{ card.names | join(", ") }}{% if card.score is not none %} (score {{ card.score }}){% endif %}
{% endfor -%}
{% endif -%}
{% if view.sql_command %}
SQL: {{ view.sql_command }}
{%- endif %}
{%- endif -%}"#;

pub fn render_json(view: &SearchView, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(view).context("serializing view")
    } else {
        serde_json::to_string(view).context("serializing view")
    }
}

/// Render the view through a minijinja template.
pub fn render_text(view: &SearchView, template: &str) -> Result<String> {
    let env = Environment::new();
    let tmpl = env
        .template_from_str(template)
        .context("parsing text template")?;
    tmpl.render(context! { view })
        .context("rendering text template")
}
