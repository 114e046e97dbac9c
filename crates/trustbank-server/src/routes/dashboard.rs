//! Dashboard summary and health routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;
use trustbank_core::format::{format_currency, initials};
use trustbank_lending::{risk_score, DEFAULT_RISK_SCORE};

/// Placeholder monthly spending figure until transaction data exists.
const MONTHLY_SPENDING: f64 = 3_240.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let latest = match state.store.latest_application() {
        Ok(latest) => latest,
        Err(e) => return Json(serde_json::json!({ "error": e.to_string() })),
    };

    let risk = latest
        .as_ref()
        .map(|l| risk_score(l.credit_score, l.debt_to_income))
        .unwrap_or(DEFAULT_RISK_SCORE);
    let credit_line = latest
        .as_ref()
        .map(|l| format!("{} Credit Line", format_currency(l.amount)));
    let avatar = latest.as_ref().map(|l| initials(&l.applicant));

    Json(serde_json::json!({
        "riskScore": risk,
        "latestLoan": latest,
        "creditLine": credit_line,
        "avatar": avatar,
        "monthlySpending": MONTHLY_SPENDING,
        "consentImpact": state.consent.impact(),
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.store.get_stats() {
        Ok(stats) => Json(serde_json::json!({
            "status": "ok",
            "time": chrono::Utc::now().to_rfc3339(),
            "stats": stats,
        })),
        Err(e) => Json(serde_json::json!({ "status": "degraded", "error": e.to_string() })),
    }
}
