use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::admin::services::AdminStatus;

/// Body of every admin request: the shared-secret password.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminAuthDto {
    #[validate(length(min = 1, message = "Le mot de passe est requis"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponseDto {
    pub message: String,
}

/// Upload/dataset status as shown in the admin panel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponseDto {
    pub pharmacy_count: i64,
    /// RFC-3339 timestamp of the last import, null when the dataset is empty.
    pub last_update: Option<String>,
    pub is_valid: bool,
}

impl From<AdminStatus> for StatusResponseDto {
    fn from(status: AdminStatus) -> Self {
        Self {
            pharmacy_count: status.pharmacy_count,
            last_update: status.last_update.map(|t| t.to_rfc3339()),
            is_valid: status.pharmacy_count > 0,
        }
    }
}
