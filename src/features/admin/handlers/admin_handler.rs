use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminAuthDto, LoginResponseDto, StatusResponseDto};
use crate::features::admin::services::AdminService;
use crate::features::pharmacies::dtos::PharmacyResponseDto;
use crate::shared::types::{ApiResponse, Meta};

/// Check the admin password
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminAuthDto,
    responses(
        (status = 200, description = "Password accepted", body = ApiResponse<LoginResponseDto>),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn login(
    State(service): State<Arc<AdminService>>,
    Json(dto): Json<AdminAuthDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    service.authorize(&dto.password)?;

    Ok(Json(ApiResponse::success(
        Some(LoginResponseDto {
            message: "Connexion réussie".to_string(),
        }),
        None,
        None,
    )))
}

/// Dataset status for the admin panel
#[utoipa::path(
    post,
    path = "/api/admin/status",
    request_body = AdminAuthDto,
    responses(
        (status = 200, description = "Dataset status", body = ApiResponse<StatusResponseDto>),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn get_status(
    State(service): State<Arc<AdminService>>,
    Json(dto): Json<AdminAuthDto>,
) -> Result<Json<ApiResponse<StatusResponseDto>>> {
    service.authorize(&dto.password)?;

    let status = service.status().await?;
    Ok(Json(ApiResponse::success(Some(status.into()), None, None)))
}

/// List every stored pharmacy, regardless of validity window
#[utoipa::path(
    post,
    path = "/api/admin/pharmacies",
    request_body = AdminAuthDto,
    responses(
        (status = 200, description = "All pharmacies", body = ApiResponse<Vec<PharmacyResponseDto>>),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn list_pharmacies(
    State(service): State<Arc<AdminService>>,
    Json(dto): Json<AdminAuthDto>,
) -> Result<Json<ApiResponse<Vec<PharmacyResponseDto>>>> {
    service.authorize(&dto.password)?;

    let pharmacies = service.list_pharmacies().await?;
    let total = pharmacies.len() as i64;
    let dtos: Vec<PharmacyResponseDto> = pharmacies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}
