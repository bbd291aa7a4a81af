use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all MoodTunes metrics
const PREFIX: &str = "moodtunes";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["method", "endpoint"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Turn Metrics
    pub static ref TURNS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_turns_total"), "Total turns by outcome"),
        &["outcome"]
    ).expect("Failed to create turns_total metric");

    pub static ref TURN_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_turn_duration_seconds"),
            "End-to-end turn duration in seconds"
        )
        .buckets(vec![0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0, 60.0])
    ).expect("Failed to create turn_duration_seconds metric");

    // Media Metrics
    pub static ref MEDIA_RESOLUTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_media_resolutions_total"), "Theme resolutions by outcome"),
        &["outcome"]
    ).expect("Failed to create media_resolutions_total metric");

    // Speech Metrics
    pub static ref SYNTHESIZED_AUDIO_BYTES: Counter = Counter::new(
        format!("{PREFIX}_synthesized_audio_bytes"),
        "Total bytes of synthesized audio"
    ).expect("Failed to create synthesized_audio_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(TURNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(TURN_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(MEDIA_RESOLUTIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(SYNTHESIZED_AUDIO_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Map a request path to a low-cardinality endpoint label.
pub fn categorize_endpoint(path: &str) -> &'static str {
    match path {
        "/" => "home",
        "/chat" => "chat",
        p if p.starts_with("/audio/") => "audio",
        _ => "other",
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// Record a finished turn
pub fn record_turn(outcome: &str, duration: Duration) {
    TURNS_TOTAL.with_label_values(&[outcome]).inc();
    TURN_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record the outcome of resolving one theme line
pub fn record_media_resolution(outcome: &str) {
    MEDIA_RESOLUTIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_synthesized_audio(bytes: usize) {
    SYNTHESIZED_AUDIO_BYTES.inc_by(bytes as f64);
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
