//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Request deadline via `tower::timeout`
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{Method, Uri};
use axum::{BoxError, Router};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::{BookRepository, PgBookRepo};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,

    /// Deadline applied to every request (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state, injected into handlers via `State`
#[derive(Clone)]
pub struct AppState {
    books: Arc<dyn BookRepository>,
}

impl AppState {
    pub fn new(books: impl BookRepository + 'static) -> Self {
        Self {
            books: Arc::new(books),
        }
    }

    /// State backed by the PostgreSQL repository
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(PgBookRepo::new(pool))
    }

    pub fn books(&self) -> &dyn BookRepository {
        self.books.as_ref()
    }
}

/// Build the application router with all routes and layers.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let after = config.request_timeout;

    let deadline = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(move |err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                ApiError::Timeout { after }
            } else {
                ApiError::Internal {
                    message: err.to_string(),
                }
            }
        }))
        .timeout(config.request_timeout);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::books::router())
        .fallback(unknown_route)
        .method_not_allowed_fallback(wrong_method)
        .layer(deadline)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any path without a route
async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}

/// Known path, unsupported method
async fn wrong_method(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&database_url).await?;
/// run_server(AppState::from_pool(pool), ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBookRepo;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::new(MemoryBookRepo::new()), &ServerConfig::default())
    }

    async fn send(method: Method, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, content_type, body)
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, _, body) = send(Method::GET, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "reachable");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, content_type, body) = send(Method::GET, "/authors").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "route '/authors' not found");
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        for (method, uri) in [
            (Method::PATCH, "/books"),
            (Method::DELETE, "/books"),
            (Method::POST, "/books/1"),
        ] {
            let (status, content_type, body) = send(method.clone(), uri).await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
            assert_eq!(content_type.as_deref(), Some("application/json"));
            assert_eq!(body["error"], "method_not_allowed");
        }
    }
}
