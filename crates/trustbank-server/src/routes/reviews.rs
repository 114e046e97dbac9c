//! Governance review and correction request routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::state::AppState;
use trustbank_store::ReviewOutcome;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews/pending", get(pending))
        .route("/reviews/{id}/approve", post(approve))
        .route("/reviews/{id}/override", post(override_decision))
        .route("/reviews/{id}/request-info", post(request_info))
        .route("/corrections", post(file_correction).get(list_corrections))
        .route("/corrections/{id}/resolve", post(resolve_correction))
}

#[derive(serde::Deserialize)]
struct ReviewBody {
    #[serde(default)]
    notes: String,
}

#[derive(serde::Deserialize)]
struct CorrectionBody {
    field: String,
    #[serde(rename = "requestedBy")]
    requested_by: String,
}

async fn pending(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.store.pending_reviews() {
        Ok(cases) => Json(serde_json::json!({
            "cases": cases,
            "total": cases.len(),
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<ReviewBody>,
) -> Json<serde_json::Value> {
    resolve_with_notes(
        &state,
        id,
        ReviewOutcome::Approved,
        body.notes,
        "AI decision approved. Case moved to completed reviews.",
    )
}

async fn override_decision(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<ReviewBody>,
) -> Json<serde_json::Value> {
    resolve_with_notes(
        &state,
        id,
        ReviewOutcome::Overridden,
        body.notes,
        "Decision overridden. Customer will be notified of the new decision.",
    )
}

async fn request_info(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    match state
        .store
        .resolve_review(id, ReviewOutcome::InfoRequested, None)
    {
        Ok(case) => Json(serde_json::json!({
            "case": case,
            "message": "Information request sent to customer. Case status: Pending additional info.",
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn resolve_with_notes(
    state: &AppState,
    id: i64,
    outcome: ReviewOutcome,
    notes: String,
    message: &str,
) -> Json<serde_json::Value> {
    let notes = notes.trim();
    if notes.is_empty() {
        return Json(serde_json::json!({ "error": "Review notes are required" }));
    }

    match state.store.resolve_review(id, outcome, Some(notes)) {
        Ok(case) => Json(serde_json::json!({
            "case": case,
            "message": message,
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn file_correction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CorrectionBody>,
) -> Json<serde_json::Value> {
    match state
        .store
        .add_correction_request(&body.field, &body.requested_by)
    {
        Ok(request) => Json(serde_json::json!({
            "request": request,
            "message": format!(
                "Correction request submitted for {}. Our team will review within 2 business days.",
                body.field
            ),
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn list_corrections(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.store.list_correction_requests() {
        Ok(requests) => Json(serde_json::json!({
            "requests": requests,
            "total": requests.len(),
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn resolve_correction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    match state.store.resolve_correction_request(&id) {
        Ok(request) => Json(serde_json::json!({
            "request": request,
            "success": true,
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}
