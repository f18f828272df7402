use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::pharmacies::models::Pharmacy;
use crate::features::pharmacies::services::PharmacyService;

/// Credential check behind the admin endpoints. Pluggable so the shared
/// secret can be swapped for real auth without touching the pipeline; the
/// shared-secret implementation is explicitly not a security boundary.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, password: &str) -> bool;
}

/// Verifies against the single shared secret from configuration.
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, password: &str) -> bool {
        password == self.secret
    }
}

/// Dataset health as reported to the administrator.
#[derive(Debug, Clone)]
pub struct AdminStatus {
    pub pharmacy_count: i64,
    pub last_update: Option<DateTime<Utc>>,
}

pub struct AdminService {
    verifier: Arc<dyn CredentialVerifier>,
    pharmacies: Arc<PharmacyService>,
}

impl AdminService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, pharmacies: Arc<PharmacyService>) -> Self {
        Self {
            verifier,
            pharmacies,
        }
    }

    /// Check the password carried in an admin request body.
    pub fn authorize(&self, password: &str) -> Result<()> {
        if self.verifier.verify(password) {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Mot de passe incorrect".to_string()))
        }
    }

    pub async fn status(&self) -> Result<AdminStatus> {
        let pharmacy_count = self.pharmacies.count().await?;
        let last_update = self.pharmacies.last_update_time().await?;

        Ok(AdminStatus {
            pharmacy_count,
            last_update,
        })
    }

    pub async fn list_pharmacies(&self) -> Result<Vec<Pharmacy>> {
        self.pharmacies.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret_verifier_matches_exactly() {
        let verifier = SharedSecretVerifier::new("s3cret".to_string());
        assert!(verifier.verify("s3cret"));
        assert!(!verifier.verify("S3CRET"));
        assert!(!verifier.verify(""));
        assert!(!verifier.verify("s3cret "));
    }
}
