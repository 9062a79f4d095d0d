//! Public HTTP surface
//!
//! Two routes: a welcome/health message at `/` and the download endpoint
//! at `/download` (GET with query parameters, POST with a JSON body).
//! Every response body is a well-formed record with an explicit `success`
//! flag — validation problems map to 400, fetch failures to 500, and both
//! still carry a rendered failure record in the negotiated format.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::error::AppError;
use crate::download::pipeline::Pipeline;
use crate::extract::ExtractionResult;
use crate::web::render::{render, OutputFormat};

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Parameters accepted by the download endpoint, via query or JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub format: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/download", get(download_get).post(download_post))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("  GET  /          - Welcome message");
    tracing::info!("  GET  /download  - Extract links (?url=...&format=json|xml)");
    tracing::info!("  POST /download  - Extract links (JSON body)");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// GET / — welcome/health message.
async fn welcome_handler() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Facebook Video Downloader API!" }))
}

/// GET /download?url=...&format=...
async fn download_get(State(state): State<AppState>, Query(params): Query<DownloadParams>) -> Response {
    handle_download(state, params).await
}

/// POST /download with a JSON body. A missing or malformed body is
/// treated like a missing URL so the caller still gets a proper record
/// instead of the extractor's plain-text rejection.
async fn download_post(
    State(state): State<AppState>,
    body: Result<Json<DownloadParams>, JsonRejection>,
) -> Response {
    let params = body.map(|Json(p)| p).unwrap_or_default();
    handle_download(state, params).await
}

async fn handle_download(state: AppState, params: DownloadParams) -> Response {
    // Unrecognized format values fall back to JSON
    let format = params
        .format
        .as_deref()
        .and_then(|f| f.parse().ok())
        .unwrap_or(OutputFormat::Json);
    let url = params.url.unwrap_or_default();

    match state.pipeline.run(&url).await {
        Ok(record) => respond(StatusCode::OK, &record, format),
        Err(AppError::Validation(e)) => {
            respond(StatusCode::BAD_REQUEST, &ExtractionResult::failure(e.to_string()), format)
        }
        Err(e) => {
            tracing::error!("Pipeline failed for {}: {}", url, e);
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ExtractionResult::failure(e.to_string()),
                format,
            )
        }
    }
}

fn respond(status: StatusCode, record: &ExtractionResult, format: OutputFormat) -> Response {
    let (content_type, body) = render(record, format);
    (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}
