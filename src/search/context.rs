//! Request identity and trace propagation across the web-request boundary.
//!
//! Zellij runs web requests on the host and hands the result back as a separate
//! event, echoing a string map supplied with the request. [`RequestContext`]
//! is what the plugin stores in that map: the request id used to drop
//! superseded responses, the requested page, and the trace context needed to
//! attach response handling to the span that issued the request.

use std::collections::BTreeMap;
use std::fmt;

const REQUEST_ID_KEY: &str = "request_id";
const PAGE_KEY: &str = "page";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Monotonically increasing identifier of an issued search request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Returns the id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distributed tracing context for cross-event span propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across events.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context,
    /// e.g. when tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("span context is not valid");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Attaches this context as the remote parent for spans created while the
    /// returned guard is held.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Data carried alongside a web request and echoed back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub page: usize,
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `request_id`, capturing the current trace.
    #[must_use]
    pub fn capture(request_id: RequestId, page: usize) -> Self {
        Self {
            request_id,
            page,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context as the string map Zellij echoes back.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(REQUEST_ID_KEY.to_string(), self.request_id.to_string());
        map.insert(PAGE_KEY.to_string(), self.page.to_string());
        if let Some(trace) = &self.trace_context {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map. Returns `None` if the map did not originate
    /// from [`RequestContext::to_map`].
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let request_id = map.get(REQUEST_ID_KEY)?.parse::<u64>().ok().map(RequestId)?;
        let page = map.get(PAGE_KEY)?.parse::<usize>().ok()?;

        let trace_context = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            request_id,
            page,
            trace_context,
        })
    }
}
