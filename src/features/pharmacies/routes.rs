use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::pharmacies::handlers;
use crate::features::pharmacies::services::PharmacyService;

/// Create routes for the pharmacies feature
pub fn routes(service: Arc<PharmacyService>) -> Router {
    Router::new()
        .route(
            "/api/pharmacies/current-week",
            get(handlers::get_current_week),
        )
        .route("/api/pharmacies/search", get(handlers::search_pharmacies))
        .with_state(service)
}
