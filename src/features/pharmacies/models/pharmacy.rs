use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Pharmacy as stored. The numeric id is server-assigned; identity for
/// deduplication purposes is the (name, location) pair, see [`PharmacyKey`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pharmacy {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub whatsapp: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a pharmacy. All fields are trimmed, non-empty strings
/// by the time a value of this type exists (the row validator guarantees it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPharmacy {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub whatsapp: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl NewPharmacy {
    pub fn key(&self) -> PharmacyKey {
        PharmacyKey {
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

/// Content-addressed identity of a pharmacy: two sheet rows with the same
/// (name, location) describe the same physical pharmacy and collapse into
/// one stored row during an import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PharmacyKey {
    pub name: String,
    pub location: String,
}
