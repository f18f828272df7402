use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::AdminService;
use crate::features::imports::handlers;
use crate::features::imports::services::ImportService;

/// State for the upload endpoint: the import pipeline plus the admin
/// credential check guarding it.
#[derive(Clone)]
pub struct ImportState {
    pub imports: Arc<ImportService>,
    pub admin: Arc<AdminService>,
}

/// Create routes for the imports feature
pub fn routes(imports: Arc<ImportService>, admin: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/upload", post(handlers::upload_sheet))
        .with_state(ImportState { imports, admin })
}
