//! Tracer provider whose exporter appends OTLP JSON to a rotating file.
//!
//! Plugins cannot open sockets, so spans are exported synchronously to a
//! file under the plugin data dir instead of to a collector.

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter writing one OTLP document per exported batch.
#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(writer: FileWriter, formatter: SpanFormatter) -> Self {
        Self {
            writer,
            formatter,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }
        if batch.is_empty() {
            return Ok(());
        }

        let document = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&document)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter = SpanFormatter::new(resource.clone());
    }
}

/// Builds a tracer provider exporting every finished span to `file_path`.
///
/// Spans are exported immediately (simple processor) since the plugin runtime
/// has no background executor to drive a batching processor.
pub fn create_tracer_provider(file_path: PathBuf, policy: RotationPolicy, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(
        FileWriter::with_policy(file_path, policy),
        SpanFormatter::new(resource.clone()),
    );

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "hn-search-test")]);
        let provider = create_tracer_provider(path.clone(), RotationPolicy::default(), resource);

        provider.tracer("test").in_span("issue request", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let document: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let span = &document["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "issue request");
        assert_eq!(span["traceId"].as_str().map(str::len), Some(32));
    }
}
