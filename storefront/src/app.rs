use std::str::FromStr;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{AppConfig, DatabaseConfig, ServerConfig};
use crate::controllers;
use crate::error::error_response;
use crate::health::{DbHealth, HealthRegistry};
use crate::layers::{catch_panic_layer, default_cors, default_trace};
use crate::schema;
use crate::state::AppState;

/// Open the SQLite pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(config.foreign_keys);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        foreign_keys = config.foreign_keys,
        "database pool opened"
    );
    Ok(pool)
}

/// Assemble the full application router over `state`.
///
/// Resource routes are registered without a trailing slash; a request that
/// matches nothing and ends in `/` is re-dispatched with the slash stripped,
/// so `/users/` and `/users` reach the same handler.
pub fn router(state: AppState) -> Router {
    let health = HealthRegistry::new().check(DbHealth::new(state.pool.clone()));

    let routes: Router = controllers::routes()
        .merge(health.routes())
        .with_state(state);

    let inner = routes.clone().fallback(not_found);
    routes
        .fallback(move |req: Request| async move {
            let path = req.uri().path();
            if path.len() <= 1 || !path.ends_with('/') {
                return not_found().await;
            }
            let trimmed = path.trim_end_matches('/');
            let uri = match req.uri().query() {
                Some(q) => format!("{trimmed}?{q}"),
                None => trimmed.to_string(),
            };
            let (mut parts, body) = req.into_parts();
            parts.uri = uri.parse().unwrap_or(parts.uri);
            match tower::ServiceExt::oneshot(inner, Request::from_parts(parts, body)).await {
                Ok(resp) => resp,
                Err(infallible) => match infallible {},
            }
        })
        .layer(catch_panic_layer())
        .layer(default_cors())
        .layer(default_trace())
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Run the service until Ctrl-C / SIGTERM, then close the pool.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server: ServerConfig = config.section()?;
    let database: DatabaseConfig = config.section()?;

    let pool = connect(&database).await?;
    schema::create_all(&pool).await?;

    let app = router(AppState::new(pool.clone()));
    let listener = TcpListener::bind(server.addr.as_str()).await?;
    info!(addr = %server.addr, profile = config.profile(), "storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("storefront stopped");
    Ok(())
}

/// Wait for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, starting graceful shutdown");
}
