use crate::conversation::{RefreshOutcome, SubmitOutcome};
use crate::error::StoreError;
use crate::persona::Mode;
use crate::store::{Collection, IdentityCard, SampleDraft, SampleType};
use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

use super::{AppState, CreateSampleBody, MessageBody, ModeBody, SamplesQuery};

type JsonResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: impl Into<String>) -> JsonResponse {
    (status, Json(json!({"error": message.into()})))
}

fn store_error_response(error: &StoreError) -> JsonResponse {
    let status = match error {
        StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Unreadable { .. } | StoreError::Write { .. } => StatusCode::BAD_GATEWAY,
    };
    if status == StatusCode::BAD_GATEWAY {
        tracing::error!(%error, "sample store request failed");
    }
    error_response(status, error.to_string())
}

fn parse_collection(raw: &str) -> Result<Collection, JsonResponse> {
    raw.parse::<Collection>()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))
}

fn refresh_label(outcome: &RefreshOutcome) -> &'static str {
    match outcome {
        RefreshOutcome::Applied => "applied",
        RefreshOutcome::Discarded => "discarded",
        RefreshOutcome::Failed(_) => "failed",
    }
}

/// Reload engine context after an administrative write.
async fn refresh_engine(state: &AppState) {
    if let RefreshOutcome::Failed(error) = state.engine.refresh().await {
        tracing::warn!(%error, "context refresh after admin write failed");
    }
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> JsonResponse {
    let mode = state.engine.mode().await;
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "mode": mode.as_str()})),
    )
}

/// GET /api/conversation — snapshot of the shared conversation
pub(super) async fn handle_conversation(State(state): State<AppState>) -> JsonResponse {
    let snapshot = state.engine.snapshot().await;
    let mut body = match serde_json::to_value(&snapshot) {
        Ok(body) => body,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    body["label"] = json!(snapshot.mode.label());
    body["placeholder"] = json!(snapshot.mode.input_placeholder());
    (StatusCode::OK, Json(body))
}

/// POST /api/mode — select a mode and wait for its context to load
pub(super) async fn handle_switch_mode(
    State(state): State<AppState>,
    body: Result<Json<ModeBody>, JsonRejection>,
) -> JsonResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {e}. Expected: {{\"mode\": \"professional\" | \"casual\"}}"),
            );
        }
    };
    let mode: Mode = match body.mode.parse() {
        Ok(mode) => mode,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("{e}")),
    };

    let context = match state.engine.switch_mode(mode).await {
        Some(handle) => match handle.await {
            Ok(outcome) => refresh_label(&outcome),
            Err(e) => {
                tracing::error!("context fetch task failed: {e}");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "context fetch failed");
            }
        },
        None => "unchanged",
    };

    (
        StatusCode::OK,
        Json(json!({
            "mode": mode.as_str(),
            "context": context,
            "error": state.engine.last_error().await,
        })),
    )
}

/// POST /api/messages — submit the next user message in the current mode
pub(super) async fn handle_message(
    State(state): State<AppState>,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> JsonResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {e}. Expected: {{\"message\": \"...\"}}"),
            );
        }
    };
    if body.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }

    let turn = state.engine.submit_turn(&body.message).await;
    let mode = turn.mode;
    match turn.outcome {
        SubmitOutcome::Replied(reply) => (
            StatusCode::OK,
            Json(json!({"mode": mode.as_str(), "reply": reply})),
        ),
        SubmitOutcome::EmptyReply => (
            StatusCode::OK,
            Json(json!({"mode": mode.as_str(), "reply": null})),
        ),
        SubmitOutcome::Ignored => {
            error_response(StatusCode::CONFLICT, "A reply is already pending.")
        }
        SubmitOutcome::Failed(message) => error_response(StatusCode::BAD_GATEWAY, message),
    }
}

/// GET /api/admin/samples?collection=&type=
pub(super) async fn handle_list_samples(
    State(state): State<AppState>,
    Query(query): Query<SamplesQuery>,
) -> JsonResponse {
    let collection = match parse_collection(
        query
            .collection
            .as_deref()
            .unwrap_or(Collection::KnowledgeChunks.as_str()),
    ) {
        Ok(c) => c,
        Err(response) => return response,
    };
    let sample_type = match query.sample_type.as_deref() {
        Some(raw) => match SampleType::parse(raw) {
            Some(t) => Some(t),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("unknown type {raw:?}; expected \"professional\" or \"casual\""),
                );
            }
        },
        None => None,
    };

    match state.admin.list(collection, sample_type).await {
        Ok(samples) => (
            StatusCode::OK,
            Json(json!({"collection": collection.as_str(), "samples": samples})),
        ),
        Err(e) => store_error_response(&e),
    }
}

/// POST /api/admin/samples
pub(super) async fn handle_create_sample(
    State(state): State<AppState>,
    body: Result<Json<CreateSampleBody>, JsonRejection>,
) -> JsonResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}")),
    };
    let collection = match parse_collection(&body.collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match state.admin.create(collection, &body.draft).await {
        Ok(sample) => {
            refresh_engine(&state).await;
            (StatusCode::CREATED, Json(json!(sample)))
        }
        Err(e) => store_error_response(&e),
    }
}

/// PUT /api/admin/samples/{collection}/{id}
pub(super) async fn handle_update_sample(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    body: Result<Json<SampleDraft>, JsonRejection>,
) -> JsonResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}")),
    };
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match state.admin.update(collection, &id, &draft).await {
        Ok(sample) => {
            refresh_engine(&state).await;
            (StatusCode::OK, Json(json!(sample)))
        }
        Err(e) => store_error_response(&e),
    }
}

/// DELETE /api/admin/samples/{collection}/{id}
pub(super) async fn handle_delete_sample(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> JsonResponse {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match state.admin.delete(collection, &id).await {
        Ok(()) => {
            refresh_engine(&state).await;
            (StatusCode::OK, Json(json!({"deleted": id})))
        }
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/admin/identity
pub(super) async fn handle_get_identity(State(state): State<AppState>) -> JsonResponse {
    match state.admin.identity().await {
        Ok(card) => (StatusCode::OK, Json(json!(card))),
        Err(e) => store_error_response(&e),
    }
}

/// PUT /api/admin/identity
pub(super) async fn handle_put_identity(
    State(state): State<AppState>,
    body: Result<Json<IdentityCard>, JsonRejection>,
) -> JsonResponse {
    let Json(card) = match body {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}")),
    };

    match state.admin.set_identity(&card).await {
        Ok(saved) => {
            refresh_engine(&state).await;
            (StatusCode::OK, Json(json!(saved)))
        }
        Err(e) => store_error_response(&e),
    }
}
