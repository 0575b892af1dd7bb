//! Data model shared by the parser, the index, and the output writers.
//!
//! `Issue` mirrors the fields of GlitchTip's issue summary that are shown
//! to the user. `StackFrame` is the resolved attribution target of one event.

use serde::{Deserialize, Deserializer, Serialize};

/// An unresolved issue as reported by GlitchTip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier, unique within one issue list
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,

    /// Short human-readable identifier (e.g. "WEB-1A")
    #[serde(rename = "shortId", default, deserialize_with = "nullable_string")]
    pub short_id: String,

    /// Human-readable summary
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,

    /// Occurrence count, kept exactly as reported
    #[serde(rename = "count", default, deserialize_with = "opaque_count")]
    pub event_count: String,

    /// Link to the issue in GlitchTip
    #[serde(default, deserialize_with = "nullable_string")]
    pub permalink: String,
}

/// The frame an issue is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Filename as reported by GlitchTip
    pub raw_filename: String,

    /// Output of `normalize_path`
    pub normalized_path: String,

    /// 1-based line in the source file
    pub line_number: u32,
}

/// Accept strings and numbers alike; GlitchTip and Sentry disagree on
/// whether ids and counts are quoted. Null and empty ids are rejected.
fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(D::Error::custom(format!(
                "expected string or number, found {}",
                other
            )))
        }
    };

    if value.is_empty() {
        return Err(D::Error::custom("empty identifier"));
    }
    Ok(value)
}

/// Like `opaque_string`, but a missing count is displayed as empty
fn opaque_count<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

/// Display fields: null reads as empty
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
