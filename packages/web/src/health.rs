//! `GET /health` for load balancers and the cluster operator.
//!
//! Reports 200 while every check is healthy and 503 otherwise, with a JSON
//! body describing uptime, version and individual checks.

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Instant;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

static STARTUP_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the server start; uptime is measured from the first call.
pub fn mark_startup() {
    STARTUP_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> f64 {
    STARTUP_TIME
        .get_or_init(Instant::now)
        .elapsed()
        .as_secs_f64()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub status: HealthStatus,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub uptime_seconds: f64,
    pub version: &'static str,
    pub checks: BTreeMap<&'static str, CheckReport>,
}

impl HealthReport {
    /// Build a report from individual checks; overall status is healthy only
    /// if all of them are.
    pub fn new(uptime_seconds: f64, checks: BTreeMap<&'static str, CheckReport>) -> Self {
        let status = if checks.values().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        Self {
            status,
            uptime_seconds,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

fn current_checks() -> BTreeMap<&'static str, CheckReport> {
    // The API is this process; if we are answering, it is up.
    BTreeMap::from([(
        "api",
        CheckReport {
            status: HealthStatus::Healthy,
            latency_ms: 0,
        },
    )])
}

pub async fn health_check() -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::new(uptime_seconds(), current_checks());
    if report.status != HealthStatus::Healthy {
        tracing::warn!(?report, "Health check failing");
    }
    (report.status_code(), Json(report))
}
