use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/login", post(handlers::login))
        .route("/api/admin/status", post(handlers::get_status))
        .route("/api/admin/pharmacies", post(handlers::list_pharmacies))
        .with_state(service)
}
