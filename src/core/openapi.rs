use utoipa::OpenApi;

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::imports::{dtos as imports_dtos, handlers as imports_handlers};
use crate::features::pharmacies::{dtos as pharmacies_dtos, handlers as pharmacies_handlers};
use crate::features::sync::handlers as sync_handlers;
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pharmagarde API",
        description = "Pharmacy on-duty directory: weekly dataset import, \
                       current-week listing, search and real-time sync.",
    ),
    paths(
        // Pharmacies (public)
        pharmacies_handlers::get_current_week,
        pharmacies_handlers::search_pharmacies,
        // Sync
        sync_handlers::ws_upgrade,
        // Admin
        admin_handlers::login,
        admin_handlers::get_status,
        admin_handlers::list_pharmacies,
        // Imports
        imports_handlers::upload_sheet,
    ),
    components(schemas(
        Meta,
        pharmacies_dtos::PharmacyResponseDto,
        admin_dtos::AdminAuthDto,
        admin_dtos::LoginResponseDto,
        admin_dtos::StatusResponseDto,
        imports_dtos::UploadFormDto,
        imports_dtos::UploadResponseDto,
    )),
    tags(
        (name = "pharmacies", description = "Public pharmacy directory"),
        (name = "sync", description = "Real-time dataset updates over WebSocket"),
        (name = "admin", description = "Administrator endpoints (shared-secret password)"),
        (name = "imports", description = "Weekly spreadsheet import"),
    )
)]
pub struct ApiDoc;
