use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    default_replies_total: AtomicU64,
    rejected_inputs_total: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub default_replies_total: u64,
    pub rejected_inputs_total: u64,
    pub avg_latency_micros: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_input(&self) {
        self.rejected_inputs_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("campus_rejected_inputs_total").increment(1);
    }

    /// Counts one reply under its category code (`default` is tracked separately too).
    pub fn record_reply(&self, category: &'static str) {
        if category == "default" {
            self.default_replies_total.fetch_add(1, Ordering::Relaxed);
        }
        metrics::counter!("campus_replies_total", "category" => category).increment(1);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            default_replies_total: self.default_replies_total.load(Ordering::Relaxed),
            rejected_inputs_total: self.rejected_inputs_total.load(Ordering::Relaxed),
            avg_latency_micros: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    init_tracing_with_level(service_name, "info");
}

/// JSON logs on stderr. `RUST_LOG` overrides the default directives.
pub fn init_tracing_with_level(service_name: &str, level: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{service_name}={level},campus_api={level},campus_agents={level}"
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
