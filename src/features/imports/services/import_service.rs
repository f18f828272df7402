use std::sync::Arc;

use chrono::Local;

use crate::core::error::{AppError, Result};
use crate::features::imports::services::row_validator::validate_row;
use crate::features::imports::services::sheet_reader::{read_first_sheet, RawRow};
use crate::features::pharmacies::models::ImportEntry;
use crate::features::pharmacies::services::PharmacyService;
use crate::features::sync::Broadcaster;

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub imported: usize,
    pub skipped: usize,
}

/// Runs the weekly refresh pipeline: parse the workbook, validate rows,
/// replace the dataset in one transaction, then broadcast the recomputed
/// current-week set to live sync clients.
pub struct ImportService {
    pharmacies: Arc<PharmacyService>,
    broadcaster: Arc<Broadcaster>,
}

impl ImportService {
    pub fn new(pharmacies: Arc<PharmacyService>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            pharmacies,
            broadcaster,
        }
    }

    /// Import an uploaded XLSX workbook.
    ///
    /// Invalid rows are skipped; an upload where no row validates is
    /// rejected outright and storage stays untouched. Storage is only
    /// mutated by the single replace transaction, so a failure there leaves
    /// the previous dataset fully intact. The broadcast runs once, after
    /// the commit.
    pub async fn import_workbook(&self, bytes: &[u8]) -> Result<ImportSummary> {
        let rows = read_first_sheet(bytes)?;
        let (entries, skipped) = collect_valid_entries(&rows);

        if entries.is_empty() {
            return Err(AppError::Validation(
                "No valid data found in the uploaded file".to_string(),
            ));
        }

        self.pharmacies.replace_all(&entries).await?;

        let today = Local::now().date_naive();
        let current_week = self.pharmacies.get_current_week(today).await?;
        self.broadcaster
            .broadcast(current_week.into_iter().map(Into::into).collect());

        let summary = ImportSummary {
            rows_read: rows.len(),
            imported: entries.len(),
            skipped,
        };
        tracing::info!(
            rows_read = summary.rows_read,
            imported = summary.imported,
            skipped = summary.skipped,
            "Dataset import committed"
        );

        Ok(summary)
    }
}

/// Validate rows in sheet order, keeping successes and counting skips.
fn collect_valid_entries(rows: &[RawRow]) -> (Vec<ImportEntry>, usize) {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for (index, row) in rows.iter().enumerate() {
        match validate_row(row) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                // +2: sheet rows are 1-based and the header is row 1.
                tracing::warn!(sheet_row = index + 2, "Skipping invalid row: {}", e);
            }
        }
    }

    (entries, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::imports::services::row_validator::{
        COL_END_DATE, COL_LOCATION, COL_NAME, COL_PHONE, COL_START_DATE, COL_WHATSAPP,
    };

    fn row(name: &str, start: &str, end: &str) -> RawRow {
        let mut row = RawRow::default();
        row.insert(COL_NAME, name);
        row.insert(COL_LOCATION, "Centre-ville");
        row.insert(COL_PHONE, "+22512345678");
        row.insert(COL_WHATSAPP, "+22512345678");
        row.insert(COL_START_DATE, start);
        row.insert(COL_END_DATE, end);
        row
    }

    fn broken_row() -> RawRow {
        let mut broken = RawRow::default();
        broken.insert(COL_NAME, "Pharmacie sans téléphone");
        broken
    }

    #[test]
    fn test_invalid_rows_are_skipped_not_fatal() {
        let rows = vec![
            row("Pharmacie A", "2024-01-01", "2024-01-07"),
            broken_row(),
            row("Pharmacie B", "2024-01-01", "2024-01-07"),
        ];

        let (entries, skipped) = collect_valid_entries(&rows);
        assert_eq!(entries.len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_sheet_order_is_preserved() {
        let rows = vec![
            row("Pharmacie B", "2024-01-01", "2024-01-07"),
            row("Pharmacie A", "2024-01-08", "2024-01-14"),
        ];

        let (entries, _) = collect_valid_entries(&rows);
        assert_eq!(entries[0].pharmacy.name, "Pharmacie B");
        assert_eq!(entries[1].pharmacy.name, "Pharmacie A");
    }

    #[test]
    fn test_all_invalid_rows_leave_nothing_to_commit() {
        let rows = vec![broken_row(), broken_row()];
        let (entries, skipped) = collect_valid_entries(&rows);
        assert!(entries.is_empty());
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_duplicate_pharmacy_rows_share_a_dedup_key() {
        // Same (name, location) under two different weeks: one pharmacy,
        // two windows. The repository collapses these by key.
        let rows = vec![
            row("Pharmacie A", "2024-01-01", "2024-01-07"),
            row("Pharmacie A", "2024-01-08", "2024-01-14"),
        ];

        let (entries, _) = collect_valid_entries(&rows);
        assert_eq!(entries[0].pharmacy.key(), entries[1].pharmacy.key());
        assert_ne!(entries[0].schedule.key(), entries[1].schedule.key());
    }
}
