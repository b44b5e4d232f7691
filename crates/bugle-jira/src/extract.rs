//! Raw issue field extraction
//!
//! Upstream issue JSON is heterogeneous: custom fields come and go, person
//! fields may be null, and arrays may be absent entirely. Extraction is
//! total over that mess. Only a missing issue key disqualifies a record;
//! every other field falls back to a sentinel.

use bugle_core::models::{IssueRecord, NONE_SENTINEL, UNASSIGNED_SENTINEL};
use serde_json::Value;
use tracing::warn;

/// Deployment-specific knobs for extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Browse-URL prefix joined with the issue key to synthesize links.
    pub browse_url: String,
    /// Custom field id holding the severity label.
    pub severity_field: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            browse_url: "https://jira.example.com/browse".to_string(),
            severity_field: "customfield_10254".to_string(),
        }
    }
}

/// Flatten one raw issue into an [`IssueRecord`].
///
/// Returns `None` (with a logged warning) when the issue has no usable key.
pub fn extract_issue(raw: &Value, options: &ExtractOptions) -> Option<IssueRecord> {
    let key = match raw.get("key").and_then(Value::as_str) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            warn!("skipping issue without a usable key");
            return None;
        }
    };

    let fields = raw.get("fields").unwrap_or(&Value::Null);
    let url = format!("{}/{}", options.browse_url.trim_end_matches('/'), key);

    Some(IssueRecord {
        key,
        url,
        issue_type: nested_name(fields, "issuetype"),
        status: nested_name(fields, "status"),
        severity: severity(fields, &options.severity_field),
        created_at: string_field(fields, "created"),
        updated_at: string_field(fields, "updated"),
        found_versions: joined_names(fields, "versions"),
        fix_versions: joined_names(fields, "fixVersions"),
        assignee: person(fields, "assignee", UNASSIGNED_SENTINEL),
        reporter: person(fields, "reporter", NONE_SENTINEL),
        title: string_field(fields, "summary"),
    })
}

/// Keep only CJK ideographs, dropping everything else.
///
/// Display names at the upstream deployment carry romanized suffixes like
/// `"张三 (Zhang San)"`; reports show the ideographic part only.
pub fn extract_chinese(text: &str) -> String {
    text.chars().filter(|&c| is_cjk(c)).collect()
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{20000}'..='\u{2a6df}'
            | '\u{2a700}'..='\u{2ebef}'
    )
}

fn string_field(fields: &Value, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or(NONE_SENTINEL)
        .to_string()
}

fn nested_name(fields: &Value, name: &str) -> String {
    fields
        .get(name)
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(NONE_SENTINEL)
        .to_string()
}

fn severity(fields: &Value, field: &str) -> String {
    // Value::get returns None on non-objects, which covers the case of the
    // custom field holding a bare string instead of {value: ...}.
    fields
        .get(field)
        .and_then(|v| v.get("value"))
        .and_then(Value::as_str)
        .unwrap_or(NONE_SENTINEL)
        .to_string()
}

fn joined_names(fields: &Value, name: &str) -> String {
    let names: Vec<&str> = fields
        .get(name)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| entry.get("name").and_then(Value::as_str).unwrap_or(""))
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        names.join(", ")
    }
}

fn person(fields: &Value, name: &str, missing: &str) -> String {
    match fields
        .get(name)
        .and_then(|v| v.get("displayName"))
        .and_then(Value::as_str)
    {
        Some(display_name) => extract_chinese(display_name),
        None => missing.to_string(),
    }
}
