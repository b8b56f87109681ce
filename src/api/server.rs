//! HTTP server for the userload API.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                              |
//! |--------|-------------|------------------------------------------|
//! | GET    | `/health`   | Health check                             |
//! | POST   | `/convert`  | Ingest CSV text and persist user records |
//! | GET    | `/api/logs` | SSE stream for ingest logs and reports   |

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{error_response, ConvertRequest, ConvertResponse};
use crate::ingest::ingest_csv;
use crate::storage::UserStore;

/// Shared handler state: the store the pipeline writes through.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

/// Build the application router.
pub fn app(store: Arc<dyn UserStore>) -> Router {
    // Permissive CORS for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/convert", post(convert))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(AppState { store })
}

/// Start the HTTP server.
pub async fn start_server(
    port: u16,
    store: Arc<dyn UserStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("userload server running on http://localhost:{}", port);
    println!("   POST /convert  - Ingest CSV user records");
    println!("   GET  /api/logs - SSE log stream");
    println!("   GET  /health   - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(store)).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "userload",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "convert": "POST /convert",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// CSV ingest endpoint.
///
/// 400 when `csvData` is absent; 500 with the error's message text on any
/// parse, transform, or persistence failure. The report never appears in
/// the response body.
pub async fn convert(
    State(state): State<AppState>,
    Json(req): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, (StatusCode, Json<Value>)> {
    let csv_data = req.csv_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(error_response("CSV data is required.")),
        )
    })?;

    ingest_csv(state.store.as_ref(), &csv_data)
        .await
        .map_err(|e| {
            log_error(format!("Ingest failed: {}", e));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_response(&e.to_string())),
            )
        })?;

    Ok(Json(ConvertResponse::saved()))
}
