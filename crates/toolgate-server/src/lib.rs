//! HTTP transport for Toolgate.
//!
//! Routes:
//! - `GET /health`
//! - `GET /tools`
//! - `POST /tool/{tool_name}`
//! - `POST /agent/run`

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, SERVICE_NAME};

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use log::info;
use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;

/// Build the router with an access log and a per-request deadline.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/tools", get(routes::list_tools))
        .route("/tool/{tool_name}", post(routes::run_tool))
        .route("/agent/run", post(routes::run_agent))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(access_log))
}

async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        "request handled (method={}, path={}, status={}, duration_ms={})",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("toolgate server listening (addr={})", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("toolgate server stopped");
    Ok(())
}
