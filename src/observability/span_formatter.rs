//! OTLP JSON span formatter.
//!
//! Converts exported span data into the OTLP/JSON encoding, one document per
//! batch, so trace files can be replayed into any OTLP collector.

use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::Value as JsonValue;

/// Scope name used when the resource carries no `service.name`.
const DEFAULT_SCOPE_NAME: &str = "hn-search";

/// OTLP JSON span formatter.
pub struct SpanFormatter {
    resource: Resource,
    /// Instrumentation scope name, taken from the resource's `service.name`.
    scope_name: String,
}

impl SpanFormatter {
    pub fn new(resource: Resource) -> Self {
        let scope_name = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| DEFAULT_SCOPE_NAME.to_string(), |value| value.to_string());
        Self { resource, scope_name }
    }

    /// Formats a batch of spans as one OTLP JSON document.
    ///
    /// ```json
    /// {
    ///   "resourceSpans": [{
    ///     "resource": {
    ///       "attributes": [{"key": "service.name", "value": {"stringValue": "hn-search"}}]
    ///     },
    ///     "scopeSpans": [{
    ///       "scope": {"name": "hn-search"},
    ///       "spans": [...]
    ///     }]
    ///   }]
    /// }
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| {
                let value = Self::format_attribute_value(v);
                serde_json::json!({
                    "key": k.to_string(),
                    "value": value
                })
            })
            .collect();

        let spans_json: Vec<JsonValue> = batch
            .iter()
            .map(Self::format_span)
            .collect();

        serde_json::json!({
            "resourceSpans": [{
                "resource": {
                    "attributes": resource_attrs
                },
                "scopeSpans": [{
                    "scope": {
                        "name": self.scope_name,
                    },
                    "spans": spans_json
                }]
            }]
        })
    }

    /// Formats a single span. IDs are lowercase hex, timestamps are decimal
    /// nanosecond strings.
    fn format_span(span: &SpanData) -> JsonValue {
        let kind = Self::span_kind_to_int(&span.span_kind);
        let attributes = Self::format_attributes(&span.attributes);
        let events = Self::format_events(&span.events);
        let links = Self::format_links(&span.links);
        let (status_code, status_message) = Self::format_status(&span.status);

        serde_json::json!({
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
                String::new()
            } else {
                format!("{:016x}", span.parent_span_id)
            },
            "name": span.name,
            "kind": kind,
            "startTimeUnixNano": unix_nanos(span.start_time),
            "endTimeUnixNano": unix_nanos(span.end_time),
            "attributes": attributes,
            "events": events,
            "links": links,
            "status": {
                "code": status_code,
                "message": status_message,
            },
        })
    }

    const fn span_kind_to_int(kind: &opentelemetry::trace::SpanKind) -> u8 {
        match kind {
            opentelemetry::trace::SpanKind::Internal => 1,
            opentelemetry::trace::SpanKind::Server => 2,
            opentelemetry::trace::SpanKind::Client => 3,
            opentelemetry::trace::SpanKind::Producer => 4,
            opentelemetry::trace::SpanKind::Consumer => 5,
        }
    }

    fn format_attributes(attributes: &[opentelemetry::KeyValue]) -> Vec<JsonValue> {
        attributes
            .iter()
            .map(|kv| {
                let value = Self::format_attribute_value(&kv.value);
                serde_json::json!({
                    "key": kv.key.to_string(),
                    "value": value
                })
            })
            .collect()
    }

    /// Arrays are not expanded; they are written as their debug string.
    fn format_attribute_value(value: &opentelemetry::Value) -> JsonValue {
        use opentelemetry::Value;

        match value {
            Value::Bool(b) => serde_json::json!({ "boolValue": b }),
            Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
            Value::F64(f) => serde_json::json!({ "doubleValue": f }),
            Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
            Value::Array(array) => serde_json::json!({ "stringValue": format!("{array:?}") }),
        }
    }

    fn format_events(events: &[opentelemetry::trace::Event]) -> Vec<JsonValue> {
        events
            .iter()
            .map(|event| {
                let event_attrs = Self::format_attributes(&event.attributes);

                serde_json::json!({
                    "timeUnixNano": unix_nanos(event.timestamp),
                    "name": event.name,
                    "attributes": event_attrs,
                })
            })
            .collect()
    }

    fn format_links(links: &[opentelemetry::trace::Link]) -> Vec<JsonValue> {
        links
            .iter()
            .map(|link| {
                let link_attrs = Self::format_attributes(&link.attributes);

                serde_json::json!({
                    "traceId": format!("{:032x}", link.span_context.trace_id()),
                    "spanId": format!("{:016x}", link.span_context.span_id()),
                    "attributes": link_attrs,
                })
            })
            .collect()
    }

    /// OTLP status code (0 unset, 1 ok, 2 error) and message.
    fn format_status(status: &opentelemetry::trace::Status) -> (u8, String) {
        match status {
            opentelemetry::trace::Status::Unset => (0, String::new()),
            opentelemetry::trace::Status::Ok => (1, String::new()),
            opentelemetry::trace::Status::Error { description } => (2, description.to_string()),
        }
    }
}

fn unix_nanos(time: std::time::SystemTime) -> String {
    time.duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope_name", &self.scope_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    #[test]
    fn scope_follows_service_name() {
        let formatter = SpanFormatter::new(Resource::new(vec![KeyValue::new("service.name", "hn-search")]));
        let document = formatter.format_batch(&[]);

        assert_eq!(document["resourceSpans"][0]["scopeSpans"][0]["scope"]["name"], "hn-search");
        assert_eq!(
            document["resourceSpans"][0]["resource"]["attributes"][0]["value"]["stringValue"],
            "hn-search"
        );
    }

    #[test]
    fn attribute_values_use_otlp_encoding() {
        use opentelemetry::Value;

        assert_eq!(
            SpanFormatter::format_attribute_value(&Value::I64(42)),
            serde_json::json!({ "intValue": "42" })
        );
        assert_eq!(
            SpanFormatter::format_attribute_value(&Value::Bool(true)),
            serde_json::json!({ "boolValue": true })
        );
    }
}
