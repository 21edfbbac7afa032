//! Tracing initialization and subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and tracer name attached to every exported span.
const SERVICE_NAME: &str = "hn-search";

/// Trace file name inside the plugin data dir.
const TRACE_FILE_NAME: &str = "hn-search-otlp.json";

/// Installs the global subscriber: `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `<data dir>/hn-search-otlp.json`.
///
/// Tracing is optional. If the data dir cannot be created the plugin runs
/// without a subscriber. Only the first call installs anything.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), RotationPolicy::default(), resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    if subscriber.try_init().is_ok() {
        tracing::debug!(level = %level, "tracing initialized");
    }
}
