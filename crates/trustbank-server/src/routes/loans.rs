//! Loan application and history routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::state::AppState;
use trustbank_core::format::format_currency;
use trustbank_lending::{risk_score, Decision, LoanRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/loans", post(apply).get(history))
        .route("/loans/latest", get(latest))
        .route("/loans/{id}/explanation", get(explanation))
}

async fn apply(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoanRequest>,
) -> Json<serde_json::Value> {
    if let Err(e) = request.validate() {
        return Json(serde_json::json!({ "error": e.to_string() }));
    }

    let decision = state.engine.decide(&request);

    match state.store.add_application(&request, &decision) {
        Ok(id) => {
            let message = match decision.decision {
                Decision::Approve => format!(
                    "Loan approved! {} approved with {:.0}% confidence.",
                    format_currency(request.amount),
                    decision.confidence * 100.0
                ),
                Decision::Reject => format!(
                    "Loan application reviewed. Status: {}. We will contact you with details.",
                    decision.decision
                ),
            };
            Json(serde_json::json!({
                "id": id,
                "decision": decision,
                "message": message,
            }))
        }
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.store.list_applications() {
        Ok(loans) => Json(serde_json::json!({
            "loans": loans,
            "total": loans.len(),
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn latest(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.store.latest_application() {
        Ok(Some(loan)) => Json(serde_json::to_value(loan).unwrap_or_default()),
        Ok(None) => Json(serde_json::json!({ "error": "No applications yet" })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn explanation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    match state.store.get_application(id) {
        Ok(loan) => Json(serde_json::json!({
            "id": loan.id,
            "decision": loan.decision,
            "confidence": loan.confidence,
            "explanation": loan.explanation,
            "riskScore": risk_score(loan.credit_score, loan.debt_to_income),
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}
