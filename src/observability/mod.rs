//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/hn-search/hn-search-otlp.json` (OTLP
//! JSON, one batch per line), rotated at 10 MB with 3 backups. The level comes
//! from the `trace_level` plugin option and defaults to `info`.
//!
//! A search request and the handling of its response happen in two separate
//! host events; the trace context travels with the request (see
//! [`crate::search::TraceContext`]) so both end up in the same trace.
//!
//! # Modules
//!
//! - `init`: Tracing initialization and subscriber setup
//! - `tracer`: Tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
