use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::pharmacies::models::Pharmacy;

/// Query parameters for pharmacy search
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PharmacySearchQuery {
    /// Substring matched case-insensitively against name or location.
    /// Queries of 2 characters or fewer return an empty list.
    #[param(example = "pharmacie")]
    pub q: Option<String>,
}

/// Response DTO for pharmacy data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyResponseDto {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub whatsapp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Pharmacy> for PharmacyResponseDto {
    fn from(pharmacy: Pharmacy) -> Self {
        Self {
            id: pharmacy.id,
            name: pharmacy.name,
            location: pharmacy.location,
            phone: pharmacy.phone,
            whatsapp: pharmacy.whatsapp,
            latitude: pharmacy.latitude,
            longitude: pharmacy.longitude,
            created_at: pharmacy.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_omits_missing_coordinates() {
        let dto = PharmacyResponseDto {
            id: 1,
            name: "Pharmacie Centrale".to_string(),
            location: "Centre-ville".to_string(),
            phone: "+22512345678".to_string(),
            whatsapp: "+22512345678".to_string(),
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("latitude").is_none());
        assert!(json.get("longitude").is_none());
        assert_eq!(json["name"], "Pharmacie Centrale");
    }

    #[test]
    fn test_dto_uses_camel_case() {
        let dto = PharmacyResponseDto {
            id: 1,
            name: "Pharmacie du Marché".to_string(),
            location: "Quartier Nord".to_string(),
            phone: "+22598765432".to_string(),
            whatsapp: "+22598765432".to_string(),
            latitude: Some("5.3364".to_string()),
            longitude: Some("-4.0267".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["latitude"], "5.3364");
    }
}
