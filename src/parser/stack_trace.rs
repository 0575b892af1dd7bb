//! Stack trace resolution for GlitchTip events.
//!
//! Pulls the exception stacktrace out of a latest-event payload and picks the
//! frame an issue should be attributed to: the innermost application frame.
//!
//! Payload shape (only the parts we read):
//! ```text
//! { "entries": [ { "type": "exception",
//!                  "data": { "values": [ { "stacktrace": { "frames": [
//!                      { "filename": "app/models/user.rb", "lineNo": 12 }, ...
//! ```

use super::classifier::is_application_frame;
use super::normalizer::normalize_path;
use super::schema::StackFrame;
use crate::utils::error::SkipReason;
use log::debug;

/// Entry type carrying the exception and its stacktrace
const EXCEPTION_ENTRY: &str = "exception";

/// One frame after normalization and classification
///
/// **Private** - frames keep their upstream order (outermost first)
#[derive(Debug)]
struct ClassifiedFrame {
    raw_filename: String,
    normalized_path: String,
    line_number: Option<u32>,
    is_application: bool,
}

/// Resolve the attribution frame of an event
///
/// **Public** - main entry point for stack resolution
///
/// # Arguments
/// * `event` - latest-event JSON for one issue
///
/// # Returns
/// The last application frame in call order, with its normalized path
///
/// # Errors
/// Never fails the caller's cycle; every miss is a `SkipReason`:
/// * `SkipReason::NoExceptionEntry` - no entry of type "exception"
/// * `SkipReason::NoStacktrace` - first exception value has no frames
/// * `SkipReason::NoApplicationFrame` - every frame is runtime or dependency code
/// * `SkipReason::MissingLineNumber` - the selected frame has no usable `lineNo`
pub fn resolve_event(event: &serde_json::Value) -> Result<StackFrame, SkipReason> {
    let frames = extract_frames(event)?;

    let classified: Vec<ClassifiedFrame> = frames.iter().map(classify_frame).collect();

    debug!(
        "Classified {} frames, {} application frames",
        classified.len(),
        classified.iter().filter(|f| f.is_application).count()
    );

    let target = classified
        .into_iter()
        .rfind(|f| f.is_application)
        .ok_or(SkipReason::NoApplicationFrame)?;

    let line_number = target.line_number.ok_or(SkipReason::MissingLineNumber)?;

    Ok(StackFrame {
        raw_filename: target.raw_filename,
        normalized_path: target.normalized_path,
        line_number,
    })
}

/// Find the frames of the first exception entry
///
/// **Private** - internal helper for resolve_event
fn extract_frames(event: &serde_json::Value) -> Result<&Vec<serde_json::Value>, SkipReason> {
    let entry = event
        .get("entries")
        .and_then(|entries| entries.as_array())
        .and_then(|entries| {
            entries
                .iter()
                .find(|e| e.get("type").and_then(|t| t.as_str()) == Some(EXCEPTION_ENTRY))
        })
        .ok_or(SkipReason::NoExceptionEntry)?;

    entry
        .pointer("/data/values/0/stacktrace/frames")
        .and_then(|frames| frames.as_array())
        .filter(|frames| !frames.is_empty())
        .ok_or(SkipReason::NoStacktrace)
}

/// Normalize and classify a single frame object
///
/// **Private** - malformed frames classify as non-application
fn classify_frame(frame: &serde_json::Value) -> ClassifiedFrame {
    let raw = frame.get("filename").and_then(|f| f.as_str());
    let normalized_path = normalize_path(raw.unwrap_or_default());
    let is_application = is_application_frame(raw, &normalized_path);

    ClassifiedFrame {
        raw_filename: raw.unwrap_or_default().to_string(),
        normalized_path,
        line_number: parse_line_number(frame.get("lineNo")),
        is_application,
    }
}

/// Read a 1-based line number
///
/// **Private** - some SDKs send the number as a string
fn parse_line_number(value: Option<&serde_json::Value>) -> Option<u32> {
    let line = match value? {
        serde_json::Value::Number(n) => n.as_u64()?,
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    u32::try_from(line).ok().filter(|&l| l > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event_with_frames(frames: serde_json::Value) -> serde_json::Value {
        json!({
            "entries": [
                { "type": "breadcrumbs", "data": { "values": [] } },
                { "type": "exception", "data": { "values": [ { "stacktrace": { "frames": frames } } ] } }
            ]
        })
    }

    #[test]
    fn test_last_application_frame_wins() {
        let event = event_with_frames(json!([
            { "filename": "app/a.rb", "lineNo": 3 },
            { "filename": "gems/dep/b.rb", "lineNo": 7 },
            { "filename": "app/c.rb", "lineNo": 11 }
        ]));

        let frame = resolve_event(&event).unwrap();
        assert_eq!(
            frame,
            StackFrame {
                raw_filename: "app/c.rb".to_string(),
                normalized_path: "app/c.rb".to_string(),
                line_number: 11,
            }
        );
    }

    #[test]
    fn test_innermost_dependency_frames_are_skipped() {
        let event = event_with_frames(json!([
            { "filename": "src\\server.ts", "lineNo": 40 },
            { "filename": "src\\routes\\users.ts", "lineNo": 18 },
            { "filename": "node_modules/pg/lib/client.js", "lineNo": 526 }
        ]));

        let frame = resolve_event(&event).unwrap();
        assert_eq!(frame.normalized_path, "src/routes/users.ts");
        assert_eq!(frame.line_number, 18);
        assert_eq!(frame.raw_filename, "src\\routes\\users.ts");
    }

    #[test]
    fn test_no_application_frames() {
        let event = event_with_frames(json!([
            { "filename": "ruby (3.2.1) lib/net/http.rb", "lineNo": 3 },
            { "filename": "/usr/lib/python3.11/site-packages/requests/api.py", "lineNo": 59 }
        ]));

        assert!(matches!(resolve_event(&event), Err(SkipReason::NoApplicationFrame)));
    }

    #[test]
    fn test_missing_exception_entry() {
        let event = json!({ "entries": [ { "type": "message", "data": {} } ] });
        assert!(matches!(resolve_event(&event), Err(SkipReason::NoExceptionEntry)));

        assert!(matches!(resolve_event(&json!({})), Err(SkipReason::NoExceptionEntry)));
        assert!(matches!(resolve_event(&json!([1, 2])), Err(SkipReason::NoExceptionEntry)));
    }

    #[test]
    fn test_missing_or_empty_frames() {
        let no_stacktrace = json!({
            "entries": [ { "type": "exception", "data": { "values": [ { "type": "ValueError" } ] } } ]
        });
        assert!(matches!(resolve_event(&no_stacktrace), Err(SkipReason::NoStacktrace)));

        let empty = event_with_frames(json!([]));
        assert!(matches!(resolve_event(&empty), Err(SkipReason::NoStacktrace)));
    }

    #[test]
    fn test_only_first_exception_entry_is_used() {
        let event = json!({
            "entries": [
                { "type": "exception", "data": { "values": [ { "stacktrace": { "frames": [
                    { "filename": "vendor/x.rb", "lineNo": 1 }
                ] } } ] } },
                { "type": "exception", "data": { "values": [ { "stacktrace": { "frames": [
                    { "filename": "app/x.rb", "lineNo": 1 }
                ] } } ] } }
            ]
        });

        assert!(matches!(resolve_event(&event), Err(SkipReason::NoApplicationFrame)));
    }

    #[test]
    fn test_malformed_frames_are_tolerated() {
        let event = event_with_frames(json!([
            { "filename": "app/ok.rb", "lineNo": "8" },
            { "lineNo": 2 },
            "not a frame",
            { "filename": 12, "lineNo": 4 }
        ]));

        let frame = resolve_event(&event).unwrap();
        assert_eq!(frame.normalized_path, "app/ok.rb");
        assert_eq!(frame.line_number, 8);
    }

    #[test]
    fn test_selected_frame_without_line() {
        let event = event_with_frames(json!([
            { "filename": "app/a.rb", "lineNo": 3 },
            { "filename": "app/b.rb", "lineNo": null }
        ]));

        assert!(matches!(resolve_event(&event), Err(SkipReason::MissingLineNumber)));
    }

    #[test]
    fn test_parse_line_number() {
        assert_eq!(parse_line_number(Some(&json!(12))), Some(12));
        assert_eq!(parse_line_number(Some(&json!(" 7 "))), Some(7));
        assert_eq!(parse_line_number(Some(&json!(0))), None);
        assert_eq!(parse_line_number(Some(&json!(-3))), None);
        assert_eq!(parse_line_number(Some(&json!(1.5))), None);
        assert_eq!(parse_line_number(None), None);
    }
}
