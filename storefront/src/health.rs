//! Liveness/readiness probes.
//!
//! | Path                | Description                                   |
//! |---------------------|-----------------------------------------------|
//! | `GET /health`       | Aggregated status, 200 if UP, 503 if DOWN     |
//! | `GET /health/live`  | Liveness probe, always 200                    |
//! | `GET /health/ready` | Readiness probe, 200 if every check passes    |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

/// A named health check.
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn check(&self) -> impl Future<Output = HealthStatus> + Send;
}

trait ErasedIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>>;
}

impl<T: HealthIndicator> ErasedIndicator for T {
    fn name(&self) -> &str {
        HealthIndicator::name(self)
    }

    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>> {
        Box::pin(HealthIndicator::check(self))
    }
}

/// Checks that the pool can run `SELECT 1`.
pub struct DbHealth {
    pool: SqlitePool,
}

impl DbHealth {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HealthIndicator for DbHealth {
    fn name(&self) -> &str {
        "db"
    }

    async fn check(&self) -> HealthStatus {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthCheckStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthCheckStatus,
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// The registered checks plus process start time.
#[derive(Clone, Default)]
pub struct HealthRegistry {
    checks: Vec<Arc<dyn ErasedIndicator>>,
    started: Option<Instant>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            started: Some(Instant::now()),
        }
    }

    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Arc::new(indicator));
        self
    }

    pub async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        for indicator in &self.checks {
            let start = Instant::now();
            let status = indicator.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;
            let (status, reason) = match status {
                HealthStatus::Up => (HealthCheckStatus::Up, None),
                HealthStatus::Down(reason) => {
                    tracing::warn!(check = indicator.name(), %reason, "health check failed");
                    (HealthCheckStatus::Down, Some(reason))
                }
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status,
                reason,
                duration_ms,
            });
        }

        let all_up = checks.iter().all(|c| c.status == HealthCheckStatus::Up);
        HealthResponse {
            status: if all_up {
                HealthCheckStatus::Up
            } else {
                HealthCheckStatus::Down
            },
            checks,
            uptime_seconds: self.started.map(|s| s.elapsed().as_secs()).unwrap_or(0),
        }
    }

    /// Routes for the three probe endpoints, carrying their own state.
    pub fn routes<S: Clone + Send + Sync + 'static>(self) -> Router<S> {
        let registry = Arc::new(self);
        Router::new()
            .route("/health", get(health_handler).with_state(registry.clone()))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(health_handler).with_state(registry))
    }
}

async fn health_handler(State(registry): State<Arc<HealthRegistry>>) -> impl IntoResponse {
    let response = registry.aggregate().await;
    let status = match response.status {
        HealthCheckStatus::Up => StatusCode::OK,
        HealthCheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

async fn liveness_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDown;

    impl HealthIndicator for AlwaysDown {
        fn name(&self) -> &str {
            "down-check"
        }

        async fn check(&self) -> HealthStatus {
            HealthStatus::Down("broken".into())
        }
    }

    #[tokio::test]
    async fn one_failing_check_marks_service_down() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let response = HealthRegistry::new()
            .check(DbHealth::new(pool))
            .check(AlwaysDown)
            .aggregate()
            .await;
        assert_eq!(response.status, HealthCheckStatus::Down);
        assert_eq!(response.checks[0].status, HealthCheckStatus::Up);
        assert_eq!(response.checks[1].reason.as_deref(), Some("broken"));
    }

    #[tokio::test]
    async fn no_checks_is_up() {
        let response = HealthRegistry::new().aggregate().await;
        assert_eq!(response.status, HealthCheckStatus::Up);
    }
}
