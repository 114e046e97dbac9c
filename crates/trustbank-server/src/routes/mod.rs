//! HTTP route handlers — one module per page concern.

pub mod consent;
pub mod dashboard;
pub mod loans;
pub mod reviews;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(consent::routes())
        .merge(dashboard::routes())
        .merge(loans::routes())
        .merge(reviews::routes())
}
