use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;

use crate::core::error::Result;
use crate::features::pharmacies::dtos::{PharmacyResponseDto, PharmacySearchQuery};
use crate::features::pharmacies::services::PharmacyService;
use crate::shared::types::{ApiResponse, Meta};

/// List pharmacies on duty today
#[utoipa::path(
    get,
    path = "/api/pharmacies/current-week",
    responses(
        (status = 200, description = "Pharmacies on duty for the current week", body = ApiResponse<Vec<PharmacyResponseDto>>)
    ),
    tag = "pharmacies"
)]
pub async fn get_current_week(
    State(service): State<Arc<PharmacyService>>,
) -> Result<Json<ApiResponse<Vec<PharmacyResponseDto>>>> {
    // Validity windows are calendar days in the server's local date.
    let today = Local::now().date_naive();
    let pharmacies = service.get_current_week(today).await?;
    let total = pharmacies.len() as i64;
    let dtos: Vec<PharmacyResponseDto> = pharmacies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Search pharmacies by name or location
#[utoipa::path(
    get,
    path = "/api/pharmacies/search",
    params(PharmacySearchQuery),
    responses(
        (status = 200, description = "Matching pharmacies", body = ApiResponse<Vec<PharmacyResponseDto>>)
    ),
    tag = "pharmacies"
)]
pub async fn search_pharmacies(
    State(service): State<Arc<PharmacyService>>,
    Query(query): Query<PharmacySearchQuery>,
) -> Result<Json<ApiResponse<Vec<PharmacyResponseDto>>>> {
    let pharmacies = service.search(query.q.as_deref().unwrap_or("")).await?;
    let total = pharmacies.len() as i64;
    let dtos: Vec<PharmacyResponseDto> = pharmacies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}
