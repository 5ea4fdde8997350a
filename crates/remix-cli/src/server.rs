//! HTTP endpoint behind `remix serve`.
//!
//! Routes:
//!
//! - `POST /api/remix`: `{text, platform?, prompt?}` → `{tweets: [...]}`
//! - `POST /api/highlights`: `{markdown, count?, seed?}` → `{quotes, selection}`
//! - `GET /health`
//!
//! Every failure is reported as `{error: "..."}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use remix_content::{HighlightExtractor, HighlightSession};
use remix_core::traits::ConfigProvider;
use remix_core::{Document, Error, Result};
use remix_llm::{RemixRequest, Remixer};

use crate::highlight_handlers::sampler_for;

const MISSING_KEY_MESSAGE: &str = "API key not configured - please check server logs";

// ============================================================================
// State
// ============================================================================

/// Shared state for all routes.
#[derive(Clone)]
pub struct ServerState {
    remixer: Option<Remixer>,
    extractor: HighlightExtractor,
    max_selection: usize,
}

impl ServerState {
    /// State built from configuration.
    ///
    /// A missing API key is logged and leaves `/api/remix` answering 500;
    /// the highlights route keeps working.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let remixer = match Remixer::from_config(config) {
            Ok(remixer) => Some(remixer),
            Err(e) => {
                tracing::error!("Remixing disabled: {e}");
                None
            }
        };
        Self {
            remixer,
            extractor: HighlightExtractor::with_marker(config.section_marker()),
            max_selection: config.max_selection(),
        }
    }

    /// Replace the remixer.
    pub fn with_remixer(mut self, remixer: Remixer) -> Self {
        self.remixer = Some(remixer);
        self
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct RemixResponse {
    tweets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HighlightsRequest {
    markdown: String,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HighlightsResponse {
    quotes: Vec<String>,
    selection: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Build the router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/remix", post(remix))
        .route("/api/highlights", post(highlights))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn remix(
    State(state): State<ServerState>,
    Json(request): Json<RemixRequest>,
) -> std::result::Result<Json<RemixResponse>, ApiError> {
    let Some(remixer) = &state.remixer else {
        tracing::error!("Remix requested but no API key is configured");
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            MISSING_KEY_MESSAGE,
        ));
    };

    let remix = remixer.remix(request).await.map_err(|e| {
        if e.is_user_facing() {
            ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
        } else {
            tracing::error!("Remix failed: {e}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    })?;

    Ok(Json(RemixResponse {
        tweets: remix.posts.into_iter().map(|p| p.text).collect(),
    }))
}

async fn highlights(
    State(state): State<ServerState>,
    Json(request): Json<HighlightsRequest>,
) -> std::result::Result<Json<HighlightsResponse>, ApiError> {
    let max_selection = request.count.unwrap_or(state.max_selection);
    if max_selection == 0 {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "count must be at least 1",
        ));
    }

    let document = Document::from_text(&request.markdown);
    let mut sampler = sampler_for(request.seed);
    let mut session = HighlightSession::new(max_selection);
    session
        .load(&state.extractor, &document, &mut sampler)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    tracing::debug!(
        "Selected {} of {} quotes",
        session.selection().len(),
        session.quotes().len()
    );

    Ok(Json(HighlightsResponse {
        quotes: session.quotes().as_slice().to_vec(),
        selection: session.selection().quotes().to_vec(),
    }))
}

// ============================================================================
// Serving
// ============================================================================

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(state: ServerState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on http://{addr}");
    tracing::info!("Health check: http://{addr}/health");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
