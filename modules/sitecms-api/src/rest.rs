use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use sitecms_common::DocumentKind;

use crate::AppState;

#[derive(Deserialize)]
pub struct RevalidateRequest {
    kind: String,
}

// --- Helpers ---

fn parse_kind(raw: &str) -> Result<DocumentKind, Response> {
    raw.parse::<DocumentKind>().map_err(|e| {
        (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
    })
}

fn internal_error(kind: DocumentKind, err: anyhow::Error, what: &str) -> Response {
    warn!(kind = %kind, error = %err, "{what} failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

// --- Handlers ---

pub async fn api_get_config(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    match state.document_or_create(kind).await {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => internal_error(kind, e, "Document read"),
    }
}

pub async fn api_put_config(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    let doc = match kind.validate(&body) {
        Ok(doc) => doc,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    match state.store.write(kind, &doc).await {
        Ok(()) => {
            info!(kind = %kind, "Document replaced");
            Json(doc).into_response()
        }
        Err(e) => internal_error(kind, e, "Document write"),
    }
}

pub async fn api_delete_config(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    match state.store.delete(kind).await {
        Ok(()) => {
            info!(kind = %kind, "Document deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => internal_error(kind, e, "Document delete"),
    }
}

pub async fn api_public(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    match state.public_view(kind).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => internal_error(kind, e, "Public view"),
    }
}

pub async fn api_revalidate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RevalidateRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&req.kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    let evicted = state.revalidate(kind).await;
    info!(kind = %kind, evicted, "Revalidated");
    StatusCode::NO_CONTENT.into_response()
}
