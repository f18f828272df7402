use serde::Serialize;
use utoipa::ToSchema;

use crate::features::imports::services::ImportSummary;

/// Multipart form for the upload endpoint (documented for Swagger only;
/// the handler reads the fields itself).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFormDto {
    /// XLSX workbook; only the first sheet is read.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Admin shared-secret password.
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub message: String,
    /// Number of valid rows committed.
    pub processed_count: usize,
    /// Number of invalid rows skipped.
    pub skipped_count: usize,
}

impl From<ImportSummary> for UploadResponseDto {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: "File processed successfully".to_string(),
            processed_count: summary.imported,
            skipped_count: summary.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_reports_counts() {
        let dto: UploadResponseDto = ImportSummary {
            rows_read: 10,
            imported: 8,
            skipped: 2,
        }
        .into();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["processedCount"], 8);
        assert_eq!(json["skippedCount"], 2);
    }
}
