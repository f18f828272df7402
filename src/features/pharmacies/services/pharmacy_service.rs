use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::pharmacies::models::{ImportEntry, NewPharmacy, NewSchedule, Pharmacy};

/// Queries shorter than this (after trimming) return an empty result set
/// without touching storage.
const MIN_SEARCH_LEN: usize = 3;

const PHARMACY_COLUMNS: &str =
    "id, name, location, phone, whatsapp, latitude, longitude, created_at";

/// Repository for pharmacies and their weekly validity windows.
///
/// All writes go through [`PharmacyService::replace_all`]; there is no
/// row-level update or delete. Reads never observe a half-replaced dataset
/// because the replace runs in a single transaction.
pub struct PharmacyService {
    pool: PgPool,
}

impl PharmacyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically replace the whole dataset with `entries`.
    ///
    /// Deletes every link, schedule and pharmacy, then re-inserts entry by
    /// entry, reusing an existing pharmacy id for a repeated (name, location)
    /// key and an existing schedule id for a repeated (start_date, end_date)
    /// key. A duplicate (pharmacy, schedule) link is a no-op. Any failure
    /// rolls the entire transaction back and the previous dataset stays
    /// intact.
    pub async fn replace_all(&self, entries: &[ImportEntry]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin replace transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM pharmacy_schedules")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM weekly_schedules")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM pharmacies")
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            let pharmacy_id = Self::upsert_pharmacy(&mut tx, &entry.pharmacy).await?;
            let schedule_id = Self::upsert_schedule(&mut tx, &entry.schedule).await?;

            sqlx::query(
                r#"
                INSERT INTO pharmacy_schedules (pharmacy_id, schedule_id)
                VALUES ($1, $2)
                ON CONFLICT (pharmacy_id, schedule_id) DO NOTHING
                "#,
            )
            .bind(pharmacy_id)
            .bind(schedule_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit replace transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Find-or-insert a pharmacy by its (name, location) dedup key.
    async fn upsert_pharmacy(
        tx: &mut Transaction<'_, Postgres>,
        pharmacy: &NewPharmacy,
    ) -> Result<i64> {
        let key = pharmacy.key();

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM pharmacies WHERE name = $1 AND location = $2",
        )
        .bind(&key.name)
        .bind(&key.location)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO pharmacies (name, location, phone, whatsapp, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&pharmacy.name)
        .bind(&pharmacy.location)
        .bind(&pharmacy.phone)
        .bind(&pharmacy.whatsapp)
        .bind(&pharmacy.latitude)
        .bind(&pharmacy.longitude)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Find-or-insert a schedule by its (start_date, end_date) dedup key.
    async fn upsert_schedule(
        tx: &mut Transaction<'_, Postgres>,
        schedule: &NewSchedule,
    ) -> Result<i64> {
        let key = schedule.key();

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM weekly_schedules WHERE start_date = $1 AND end_date = $2",
        )
        .bind(key.start_date)
        .bind(key.end_date)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO weekly_schedules (start_date, end_date)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(schedule.start_date)
        .bind(schedule.end_date)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Pharmacies on duty on `date`: linked to a window whose
    /// [start_date, end_date] contains it, inclusive at both ends.
    /// Ordered by name so clients see a stable listing.
    pub async fn get_current_week(&self, date: NaiveDate) -> Result<Vec<Pharmacy>> {
        let pharmacies = sqlx::query_as::<_, Pharmacy>(
            r#"
            SELECT DISTINCT p.id, p.name, p.location, p.phone, p.whatsapp,
                   p.latitude, p.longitude, p.created_at
            FROM pharmacies p
            INNER JOIN pharmacy_schedules ps ON ps.pharmacy_id = p.id
            INNER JOIN weekly_schedules ws ON ws.id = ps.schedule_id
            WHERE ws.start_date <= $1 AND ws.end_date >= $1
            ORDER BY p.name ASC, p.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch current week pharmacies: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(pharmacies)
    }

    /// Case-insensitive substring search over name OR location. Queries of
    /// two characters or fewer come back empty without a storage round trip.
    pub async fn search(&self, query: &str) -> Result<Vec<Pharmacy>> {
        let trimmed = query.trim();
        if !is_searchable(trimmed) {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(trimmed));
        let pharmacies = sqlx::query_as::<_, Pharmacy>(&format!(
            r#"
            SELECT {PHARMACY_COLUMNS}
            FROM pharmacies
            WHERE name ILIKE $1 OR location ILIKE $1
            ORDER BY name ASC, id ASC
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search pharmacies: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(pharmacies)
    }

    pub async fn get_all(&self) -> Result<Vec<Pharmacy>> {
        let pharmacies = sqlx::query_as::<_, Pharmacy>(&format!(
            "SELECT {PHARMACY_COLUMNS} FROM pharmacies ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(pharmacies)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pharmacies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Most recent pharmacy creation timestamp, or `None` when the dataset
    /// is empty. Every import re-creates all rows, so this is the time of
    /// the last successful import.
    pub async fn last_update_time(&self) -> Result<Option<DateTime<Utc>>> {
        let last = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(created_at) FROM pharmacies",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(last)
    }
}

/// True when the trimmed query is long enough to be worth a storage query.
pub(crate) fn is_searchable(trimmed: &str) -> bool {
    trimmed.chars().count() >= MIN_SEARCH_LEN
}

/// Escape LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_queries_are_not_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("p"));
        assert!(!is_searchable("ph"));
    }

    #[test]
    fn test_three_chars_and_up_are_searchable() {
        assert!(is_searchable("pha"));
        assert!(is_searchable("pharmacie centrale"));
    }

    #[test]
    fn test_multibyte_chars_count_as_one() {
        // two chars, not searchable even though the byte length is 4
        assert!(!is_searchable("éé"));
        assert!(is_searchable("ééé"));
    }

    #[test]
    fn test_escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("Pharmacie Centrale"), "Pharmacie Centrale");
    }

    #[test]
    fn test_escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c\\d"), "c\\\\d");
    }
}
