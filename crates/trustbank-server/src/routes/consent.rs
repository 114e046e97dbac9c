//! Consent settings and impact routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::state::AppState;
use trustbank_consent::{ConsentCategory, ConsentImpact, ConsentSettings};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/consent/settings", get(get_settings))
        .route("/consent/settings/{category}", post(set_category))
        .route("/consent/impact", get(get_impact))
        .route("/consent/save", post(save_settings))
}

#[derive(serde::Deserialize)]
struct SetCategoryBody {
    enabled: bool,
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<ConsentSettings> {
    Json(state.consent.settings())
}

async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(body): Json<SetCategoryBody>,
) -> Json<serde_json::Value> {
    match category.parse::<ConsentCategory>() {
        Ok(category) => {
            let settings = state.consent.set_category(category, body.enabled);
            Json(serde_json::json!({
                "settings": settings,
                "impact": settings.impact(),
            }))
        }
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}

async fn get_impact(State(state): State<Arc<AppState>>) -> Json<ConsentImpact> {
    Json(state.consent.impact())
}

async fn save_settings(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.consent.save() {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Consent preferences saved successfully!",
        })),
        Err(e) => Json(serde_json::json!({ "error": e.to_string() })),
    }
}
