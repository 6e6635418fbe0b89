use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use opentelemetry::KeyValue;
use std::sync::Arc;

pub mod labels {
    pub const OUTCOME: &str = "outcome";
    pub const ERROR_TYPE: &str = "error_type";
    pub const STATUS_CODE: &str = "status_code";
    pub const SCHEME: &str = "scheme";
}

pub mod values {
    pub const OUTCOME_RECORDED: &str = "recorded";
    pub const OUTCOME_NOT_RECORDED: &str = "not_recorded";
    pub const OUTCOME_PASSED_THROUGH: &str = "passed_through";
    pub const OUTCOME_CAPTURE_FAILED: &str = "capture_failed";
}

#[derive(Clone)]
pub struct Metrics {
    pub exchanges_total: Counter<u64>,
    pub capture_errors_total: Counter<u64>,

    pub records_written_total: Counter<u64>,
    pub record_bytes_total: Counter<u64>,

    pub upstream_duration_seconds: Histogram<f64>,
}

impl Metrics {
    pub fn new(meter: Meter) -> Self {
        Self {
            exchanges_total: meter
                .u64_counter("wirecap_exchanges_total")
                .with_description("Intercepted requests handled, by outcome")
                .build(),
            capture_errors_total: meter
                .u64_counter("wirecap_capture_errors_total")
                .with_description("Exchanges aborted by a transport or decode failure")
                .build(),
            records_written_total: meter
                .u64_counter("wirecap_records_written_total")
                .with_description("Records persisted to the sink")
                .build(),
            record_bytes_total: meter
                .u64_counter("wirecap_record_bytes_total")
                .with_description("Encoded record bytes persisted to the sink")
                .build(),
            upstream_duration_seconds: meter
                .f64_histogram("wirecap_upstream_duration_seconds")
                .with_description("Time to receive and decode the full upstream response")
                .with_unit("s")
                .build(),
        }
    }

    pub fn record_exchange(&self, outcome: &str) {
        self.exchanges_total
            .add(1, &[KeyValue::new(labels::OUTCOME, outcome.to_string())]);
    }

    pub fn record_capture_error(&self, error_type: &str) {
        self.capture_errors_total
            .add(1, &[KeyValue::new(labels::ERROR_TYPE, error_type.to_string())]);
    }

    pub fn record_written(&self, bytes: u64) {
        self.records_written_total.add(1, &[]);
        if bytes > 0 {
            self.record_bytes_total.add(bytes, &[]);
        }
    }

    pub fn record_upstream_duration(&self, duration: f64, status_code: u16, scheme: &str) {
        self.upstream_duration_seconds.record(
            duration,
            &[
                KeyValue::new(labels::STATUS_CODE, status_code.to_string()),
                KeyValue::new(labels::SCHEME, scheme.to_string()),
            ],
        );
    }
}

/// Instruments from the global meter provider
///
/// Nothing is exported unless the embedding application installs a provider.
pub fn init_metrics() -> Arc<Metrics> {
    Arc::new(Metrics::new(global::meter("wirecap")))
}
