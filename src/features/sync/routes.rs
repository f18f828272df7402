use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::sync::handlers;
use crate::features::sync::Broadcaster;

/// Create routes for the sync feature
pub fn routes(broadcaster: Arc<Broadcaster>) -> Router {
    Router::new()
        .route("/ws", get(handlers::ws_upgrade))
        .with_state(broadcaster)
}
