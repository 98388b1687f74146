use super::*;
use crate::types::SummaryEnvelope;
use serde_json::json;

fn summary(value: serde_json::Value) -> RawSummary {
    serde_json::from_value(value).unwrap()
}

// ===================================================================
// Sentinel detection
// ===================================================================

#[test]
fn nil_token_variants() {
    for s in ["NIL", "nil", "Nil", "  NIL  ", "\tnIl\n", "nıl"] {
        assert!(is_nil_token(s), "{s:?} should be the sentinel");
    }
    for s in ["", "NILL", "N I L", "null", "None", "N/A", "nil value"] {
        assert!(!is_nil_token(s), "{s:?} should not be the sentinel");
    }
}

#[test]
fn nil_resolves_to_absent_at_every_depth() {
    for token in ["NIL", " nil ", "Nil"] {
        assert_eq!(summary(json!(token)).resolve_text(), None);
        assert_eq!(summary(json!({ "summary": token })).resolve_text(), None);
        assert_eq!(
            summary(json!({ "summary": { "summary": token } })).resolve_text(),
            None
        );
        assert_eq!(summary(json!([token])).resolve_text(), None);
        assert_eq!(summary(json!({ "summary": [token, token] })).resolve_lines(), None);
    }
}

// ===================================================================
// Quote cleaning
// ===================================================================

#[test]
fn clean_quotes_strips_wrapping_runs() {
    assert_eq!(clean_quotes("\"CBC\""), "CBC");
    assert_eq!(clean_quotes("'''CBC'''"), "CBC");
    assert_eq!(clean_quotes("  \"'Liver Function'\"  "), "Liver Function");
    assert_eq!(clean_quotes(" ' CBC ' "), "CBC");
    assert_eq!(clean_quotes("Crohn's disease"), "Crohn's disease");
    assert_eq!(clean_quotes("\"\""), "");
}

#[test]
fn clean_quotes_is_idempotent() {
    for s in ["CBC", " \"a\" ", "'\" b \"'", "x's", "", "  ", "\"mixed' "] {
        let once = clean_quotes(s);
        assert_eq!(clean_quotes(&once), once, "not idempotent for {s:?}");
    }
}

// ===================================================================
// Shape flattening
// ===================================================================

#[test]
fn text_is_trimmed() {
    let s = summary(json!("  Fever, cough  \n"));
    assert_eq!(s.resolve_text().as_deref(), Some("Fever, cough"));
    assert_eq!(s.resolve_lines(), None);
}

#[test]
fn blank_text_is_absent() {
    assert_eq!(summary(json!("   ")).resolve_text(), None);
    assert_eq!(summary(json!("")).resolve_text(), None);
}

#[test]
fn lines_are_cleaned_and_joined() {
    let s = summary(json!(["\"Fatigue\"", "NIL", "  'Pale skin' ", "", "Dizziness"]));
    assert_eq!(
        s.resolve_lines(),
        Some(vec!["Fatigue".to_string(), "Pale skin".into(), "Dizziness".into()])
    );
    assert_eq!(s.resolve_text().as_deref(), Some("Fatigue\nPale skin\nDizziness"));
}

#[test]
fn scalar_list_elements_are_stringified() {
    let s = summary(json!(["Dose", 5, true, null, { "x": 1 }]));
    assert_eq!(
        s.resolve_lines(),
        Some(vec!["Dose".to_string(), "5".into(), "true".into()])
    );
}

#[test]
fn empty_list_is_absent() {
    assert_eq!(summary(json!([])).resolve_text(), None);
    assert_eq!(summary(json!([])).resolve_lines(), None);
}

#[test]
fn wrapped_summary_resolves_inner_field() {
    let s = summary(json!({ "summary": ["a", "b"], "source": "s.csv" }));
    assert_eq!(s.resolve_text().as_deref(), Some("a\nb"));
    assert_eq!(s.resolve_lines(), Some(vec!["a".to_string(), "b".into()]));

    let s = summary(json!({ "summary": "Heading: body", "source": "s.csv" }));
    assert_eq!(s.resolve_text().as_deref(), Some("Heading: body"));
    assert_eq!(s.resolve_lines(), None);
}

#[test]
fn wrapper_without_summary_is_absent() {
    let s = RawSummary::Wrapped(SummaryEnvelope {
        source: Some("s.pdf".into()),
        ..Default::default()
    });
    assert_eq!(s.resolve_text(), None);
    assert_eq!(s.resolve_lines(), None);
}

#[test]
fn unsupported_shapes_degrade_to_absent() {
    assert_eq!(summary(json!(12)).resolve_text(), None);
    assert_eq!(summary(json!(false)).resolve_text(), None);
    assert_eq!(summary(json!({ "summary": 3.5 })).resolve_text(), None);
}

#[test]
fn summary_lines_split_and_drop_blanks() {
    assert_eq!(
        summary_lines("first\r\n\n  second  \n\t\nthird"),
        vec!["first".to_string(), "second".into(), "third".into()]
    );
    assert!(summary_lines("   ").is_empty());
}

#[test]
fn wrapper_with_non_string_source_resolves_summary() {
    let s = summary(json!({ "summary": "Fever, cough", "source": 7 }));
    assert_eq!(s.resolve_text().as_deref(), Some("Fever, cough"));

    let s = summary(json!({ "summary": ["a", "b"], "source": [1, 2] }));
    assert_eq!(s.resolve_lines(), Some(vec!["a".to_string(), "b".into()]));
}
