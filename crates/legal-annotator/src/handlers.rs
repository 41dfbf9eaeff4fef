use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lexicon_db::Lexicon;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::brat::{AnnotationRecord, annotation_records, render_annotations};
use crate::index::ResultsIndex;
use crate::scanner::DictionaryScanner;

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    /// Precompiled scanner for the default domain.
    pub scanner: Arc<DictionaryScanner>,
    pub max_text_bytes: usize,
}

#[derive(Deserialize)]
pub struct AnnotateRequest {
    pub text: String,
    pub domain: Option<String>,
}

#[derive(Serialize)]
pub struct AnnotateResponse {
    domain: String,
    count: usize,
    annotations: Vec<AnnotationRecord>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/annotate", post(annotate))
        .route("/v1/annotate/ann", post(annotate_ann))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn annotate(
    State(state): State<AppState>,
    Json(request): Json<AnnotateRequest>,
) -> Result<Json<AnnotateResponse>, ApiError> {
    let (domain, resolved) = run_scan(&state, &request)?;
    let annotations = annotation_records(&resolved);
    Ok(Json(AnnotateResponse {
        domain,
        count: annotations.len(),
        annotations,
    }))
}

async fn annotate_ann(
    State(state): State<AppState>,
    Json(request): Json<AnnotateRequest>,
) -> Result<Response, ApiError> {
    let (_, resolved) = run_scan(&state, &request)?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        render_annotations(&resolved),
    )
        .into_response())
}

fn run_scan(
    state: &AppState,
    request: &AnnotateRequest,
) -> Result<(String, ResultsIndex), ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }
    if request.text.len() > state.max_text_bytes {
        return Err(ApiError::bad_request(format!(
            "text must be at most {} bytes",
            state.max_text_bytes
        )));
    }

    let scanner = match request.domain.as_deref() {
        None | Some("") => Cow::Borrowed(state.scanner.as_ref()),
        Some(domain) if domain == state.scanner.domain() => Cow::Borrowed(state.scanner.as_ref()),
        Some(domain) => {
            debug!("compiling request scanner for domain {}", domain);
            let scanner = DictionaryScanner::new(&state.lexicon, domain).map_err(|e| {
                error!("failed to compile scanner for {domain}: {e}");
                ApiError::Internal
            })?;
            Cow::Owned(scanner)
        }
    };

    let resolved = scanner.scan(&request.text);
    Ok((scanner.domain().to_string(), resolved))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
