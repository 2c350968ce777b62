//! HTTP surface for Scholar's Lens.
//!
//! This module exposes a compact Axum router with three endpoints:
//!
//! - `GET /` – Liveness probe returning `{ "status": ... }`.
//! - `POST /upload` – Multipart upload (field `file`, `.pdf` or `.txt`). Extracts and cleans the
//!   document text and returns `{ "text": ... }`.
//! - `POST /summarize` – JSON `{ "text", "difficulty" }`. Returns
//!   `{ "short_notes", "bullet_points", "exam_summary" }`.
//!
//! Errors are returned as `{ "detail": ... }`: 400 for unusable uploads or blank text, 422 for a
//! missing upload field (schema failures on JSON bodies are rejected by the `Json` extractor with
//! 422 as well), and 502 when the LLM call fails.

use crate::config::{Config, CorsOrigins};
use crate::document::{DocumentError, UploadedDocument};
use crate::notes::NoteSections;
use crate::service::{NotesApi, NotesError};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

/// Liveness string returned by `GET /`.
pub const STATUS_MESSAGE: &str = "Scholar's Lens API running";

/// Build the HTTP router exposing the notes API surface.
pub fn create_router<S>(service: Arc<S>, config: &Config) -> Router
where
    S: NotesApi + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/upload", post(upload_file::<S>))
        .route("/summarize", post(summarize::<S>))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.cors_origins))
        .with_state(service)
}

/// Translate the configured origin policy into a CORS layer.
///
/// Wildcard origins cannot carry credentials, so only an explicit allow-list enables them.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(list.iter().cloned()))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
    }
}

/// Response body for `GET /`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE,
    })
}

/// Response body for `POST /upload`.
#[derive(Serialize)]
struct UploadResponse {
    /// Cleaned document text, to be sent back to `/summarize`.
    text: String,
}

/// Extract and clean the text of an uploaded PDF or TXT file.
async fn upload_file<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError>
where
    S: NotesApi,
{
    let document = read_upload(multipart).await?;
    let filename = document.filename.clone().unwrap_or_default();
    let size = document.bytes.len();
    let text = service.extract_text(document).await?;
    tracing::info!(
        filename,
        bytes = size,
        cleaned_chars = text.chars().count(),
        "Upload request completed"
    );
    Ok(Json(UploadResponse { text }))
}

/// Pull the `file` field out of the multipart body, skipping any other fields.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedDocument, NotesError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| NotesError::MalformedUpload(error.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|error| NotesError::MalformedUpload(error.to_string()))?;
        return Ok(UploadedDocument { filename, bytes });
    }
    Err(NotesError::MissingFile)
}

/// Request body for `POST /summarize`.
#[derive(Deserialize)]
struct SummarizeRequest {
    /// Cleaned text previously returned by `/upload`.
    text: String,
    /// Free-form difficulty label, e.g. `easy` or `exam`.
    difficulty: String,
}

/// Generate study notes for the submitted text.
async fn summarize<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<NoteSections>, AppError>
where
    S: NotesApi,
{
    let notes = service
        .summarize(&request.text, &request.difficulty)
        .await?;
    tracing::info!(
        difficulty = request.difficulty,
        input_chars = request.text.chars().count(),
        "Summarize request completed"
    );
    Ok(Json(notes))
}

struct AppError(NotesError);

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            NotesError::Document(_) | NotesError::MalformedUpload(_) | NotesError::EmptyText => {
                StatusCode::BAD_REQUEST
            }
            NotesError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            NotesError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Client-facing message; parse details stay in the logs.
    fn detail(&self) -> String {
        match &self.0 {
            NotesError::Document(DocumentError::Parse(_)) => "PDF text extraction failed".into(),
            NotesError::Document(DocumentError::InvalidEncoding(_)) => {
                "Text file is not valid UTF-8".into()
            }
            NotesError::Document(DocumentError::UnsupportedFormat(_)) => {
                "Only PDF and TXT supported".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self.0, "Request failed upstream");
        } else {
            tracing::debug!(error = %self.0, %status, "Rejected request");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<NotesError> for AppError {
    fn from(inner: NotesError) -> Self {
        Self(inner)
    }
}
