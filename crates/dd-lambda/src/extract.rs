//! Trace context extraction from an incoming event's headers.
//!
//! Reads `x-datadog-trace-id`, `x-datadog-parent-id` and
//! `x-datadog-sampling-priority` from `event.headers`. Header names are matched
//! case-insensitively. Anything missing or malformed is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const TRACE_ID_HEADER: &str = "x-datadog-trace-id";
pub const PARENT_ID_HEADER: &str = "x-datadog-parent-id";
pub const SAMPLING_PRIORITY_HEADER: &str = "x-datadog-sampling-priority";

/// Distributed trace identifiers propagated through request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_mode: Option<i32>,
}

impl TraceContext {
    /// Whether none of the three fields were found.
    pub fn is_empty(&self) -> bool {
        self.trace_id.is_none() && self.parent_id.is_none() && self.sample_mode.is_none()
    }
}

/// Extract the trace context carried by `event`.
///
/// Events without a `headers` object yield an empty context.
pub fn extract_trace_context(event: &Value) -> TraceContext {
    let Some(headers) = event.get("headers").and_then(Value::as_object) else {
        debug!("event has no headers object, no trace context extracted");
        return TraceContext::default();
    };

    let trace_id = header(headers, TRACE_ID_HEADER)
        .and_then(Value::as_str)
        .map(str::to_string);

    let parent_id = header(headers, PARENT_ID_HEADER)
        .and_then(Value::as_str)
        .map(str::to_string);

    let sample_mode = header(headers, SAMPLING_PRIORITY_HEADER).and_then(parse_priority);

    let context = TraceContext {
        trace_id,
        parent_id,
        sample_mode,
    };
    debug!(?context, "extracted trace context from event headers");
    context
}

fn header<'a>(headers: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    headers.get(name).or_else(|| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn parse_priority(value: &Value) -> Option<i32> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_full_headers() {
        let event = json!({
            "headers": {
                "x-datadog-trace-id": "12345",
                "x-datadog-parent-id": "45678",
                "x-datadog-sampling-priority": "2"
            }
        });

        let ctx = extract_trace_context(&event);
        assert_eq!(ctx.trace_id.as_deref(), Some("12345"));
        assert_eq!(ctx.parent_id.as_deref(), Some("45678"));
        assert_eq!(ctx.sample_mode, Some(2));
    }

    #[test]
    fn test_extract_partial_headers() {
        let event = json!({ "headers": { "x-datadog-trace-id": "12345" } });

        let ctx = extract_trace_context(&event);
        assert_eq!(ctx.trace_id.as_deref(), Some("12345"));
        assert!(ctx.parent_id.is_none());
        assert!(ctx.sample_mode.is_none());
    }

    #[test]
    fn test_extract_mixed_case_headers() {
        let event = json!({
            "headers": {
                "X-Datadog-Trace-Id": "1",
                "X-Datadog-Parent-Id": "2",
                "X-Datadog-Sampling-Priority": "-1"
            }
        });

        let ctx = extract_trace_context(&event);
        assert_eq!(ctx.trace_id.as_deref(), Some("1"));
        assert_eq!(ctx.parent_id.as_deref(), Some("2"));
        assert_eq!(ctx.sample_mode, Some(-1));
    }

    #[test]
    fn test_numeric_sampling_priority() {
        let event = json!({ "headers": { "x-datadog-sampling-priority": 1 } });
        assert_eq!(extract_trace_context(&event).sample_mode, Some(1));
    }

    #[test]
    fn test_malformed_values_are_absent() {
        let event = json!({
            "headers": {
                "x-datadog-trace-id": 12345,
                "x-datadog-sampling-priority": "keep"
            }
        });

        let ctx = extract_trace_context(&event);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_events_without_headers() {
        assert!(extract_trace_context(&json!("1")).is_empty());
        assert!(extract_trace_context(&json!({ "body": "{}" })).is_empty());
        assert!(extract_trace_context(&json!({ "headers": null })).is_empty());
        assert!(extract_trace_context(&json!({ "headers": ["x"] })).is_empty());
    }
}
