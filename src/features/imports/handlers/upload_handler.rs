use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::imports::dtos::{UploadFormDto, UploadResponseDto};
use crate::features::imports::routes::ImportState;
use crate::shared::types::ApiResponse;

/// Upload the weekly spreadsheet
///
/// Accepts multipart/form-data with:
/// - `file`: the XLSX workbook (required, first sheet only)
/// - `password`: the admin shared-secret (required)
///
/// Replaces the whole dataset with the valid rows of the sheet and pushes
/// the refreshed current-week set to connected sync clients.
#[utoipa::path(
    post,
    path = "/api/admin/upload",
    tag = "imports",
    request_body(
        content = UploadFormDto,
        content_type = "multipart/form-data",
        description = "Weekly on-duty spreadsheet plus the admin password",
    ),
    responses(
        (status = 200, description = "Dataset replaced", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Unreadable workbook or no valid rows"),
        (status = 401, description = "Wrong password")
    )
)]
pub async fn upload_sheet(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponseDto>>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut password: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            "password" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read password field: {}", e))
                })?;
                password = Some(text);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // The password may arrive after the file; authorize once all fields are in.
    let password =
        password.ok_or_else(|| AppError::Unauthorized("Mot de passe requis".to_string()))?;
    state.admin.authorize(&password)?;

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let summary = state.imports.import_workbook(&file_data).await?;

    Ok(Json(ApiResponse::success(
        Some(summary.into()),
        None,
        None,
    )))
}
