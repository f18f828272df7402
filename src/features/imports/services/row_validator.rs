use chrono::NaiveDate;
use thiserror::Error;

use crate::features::imports::services::sheet_reader::RawRow;
use crate::features::pharmacies::models::{ImportEntry, NewPharmacy, NewSchedule};

// Recognized columns, matched case-sensitively against the header row.
pub const COL_NAME: &str = "nom";
pub const COL_LOCATION: &str = "localisation";
pub const COL_PHONE: &str = "telephone";
pub const COL_WHATSAPP: &str = "whatsapp";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_START_DATE: &str = "dateDebut";
pub const COL_END_DATE: &str = "dateFin";

/// Why one row was rejected. Row-level only: the importer skips the row and
/// carries on, this never aborts an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing or empty required column '{0}'")]
    MissingField(&'static str),

    #[error("column '{0}' is not an ISO calendar date (YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("end date precedes start date")]
    InvertedWindow,
}

/// Validate one raw sheet row into a pharmacy plus its validity window.
///
/// Required columns must be present and non-empty after trimming; the two
/// date columns must parse as ISO calendar dates and form a non-inverted
/// window. Latitude and longitude are carried through verbatim when present.
pub fn validate_row(row: &RawRow) -> Result<ImportEntry, RowError> {
    let name = required(row, COL_NAME)?;
    let location = required(row, COL_LOCATION)?;
    let phone = required(row, COL_PHONE)?;
    let whatsapp = required(row, COL_WHATSAPP)?;
    let schedule = NewSchedule {
        start_date: required_date(row, COL_START_DATE)?,
        end_date: required_date(row, COL_END_DATE)?,
    };

    // An inverted window contains no date at all, not even its own start.
    if !schedule.contains(schedule.start_date) {
        return Err(RowError::InvertedWindow);
    }

    Ok(ImportEntry {
        pharmacy: NewPharmacy {
            name,
            location,
            phone,
            whatsapp,
            latitude: optional(row, COL_LATITUDE),
            longitude: optional(row, COL_LONGITUDE),
        },
        schedule,
    })
}

fn required(row: &RawRow, column: &'static str) -> Result<String, RowError> {
    match row.get(column).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(RowError::MissingField(column)),
    }
}

fn required_date(row: &RawRow, column: &'static str) -> Result<NaiveDate, RowError> {
    let raw = required(row, column)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| RowError::InvalidDate(column))
}

fn optional(row: &RawRow, column: &str) -> Option<String> {
    row.get(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row() -> RawRow {
        let mut row = RawRow::default();
        row.insert(COL_NAME, "Pharmacie Centrale");
        row.insert(COL_LOCATION, "Centre-ville");
        row.insert(COL_PHONE, "+22512345678");
        row.insert(COL_WHATSAPP, "+22512345678");
        row.insert(COL_START_DATE, "2024-01-01");
        row.insert(COL_END_DATE, "2024-01-07");
        row
    }

    #[test]
    fn test_complete_row_validates() {
        let entry = validate_row(&complete_row()).unwrap();
        assert_eq!(entry.pharmacy.name, "Pharmacie Centrale");
        assert_eq!(entry.pharmacy.latitude, None);
        assert_eq!(entry.schedule.start_date, "2024-01-01".parse().unwrap());
        assert_eq!(entry.schedule.end_date, "2024-01-07".parse().unwrap());
    }

    #[test]
    fn test_each_required_column_is_enforced() {
        for column in [
            COL_NAME,
            COL_LOCATION,
            COL_PHONE,
            COL_WHATSAPP,
            COL_START_DATE,
            COL_END_DATE,
        ] {
            let mut row = RawRow::default();
            for other in [
                COL_NAME,
                COL_LOCATION,
                COL_PHONE,
                COL_WHATSAPP,
            ] {
                if other != column {
                    row.insert(other, "x");
                }
            }
            for other in [COL_START_DATE, COL_END_DATE] {
                if other != column {
                    row.insert(other, "2024-01-01");
                }
            }

            assert_eq!(
                validate_row(&row),
                Err(RowError::MissingField(column)),
                "column {column} should be required"
            );
        }
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let mut row = complete_row();
        row.insert(COL_PHONE, "   ");
        assert_eq!(validate_row(&row), Err(RowError::MissingField(COL_PHONE)));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut row = complete_row();
        row.insert(COL_NAME, "  Pharmacie du Marché  ");
        let entry = validate_row(&row).unwrap();
        assert_eq!(entry.pharmacy.name, "Pharmacie du Marché");
    }

    #[test]
    fn test_non_iso_date_is_rejected() {
        let mut row = complete_row();
        row.insert(COL_START_DATE, "01/01/2024");
        assert_eq!(
            validate_row(&row),
            Err(RowError::InvalidDate(COL_START_DATE))
        );

        let mut row = complete_row();
        row.insert(COL_END_DATE, "2024-13-40");
        assert_eq!(validate_row(&row), Err(RowError::InvalidDate(COL_END_DATE)));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let mut row = complete_row();
        row.insert(COL_START_DATE, "2024-01-08");
        row.insert(COL_END_DATE, "2024-01-01");
        assert_eq!(validate_row(&row), Err(RowError::InvertedWindow));
    }

    #[test]
    fn test_single_day_window_is_accepted() {
        let mut row = complete_row();
        row.insert(COL_START_DATE, "2024-01-01");
        row.insert(COL_END_DATE, "2024-01-01");
        assert!(validate_row(&row).is_ok());
    }

    #[test]
    fn test_optional_coordinates_are_carried_through() {
        let mut row = complete_row();
        row.insert(COL_LATITUDE, " 5.3364 ");
        row.insert(COL_LONGITUDE, "-4.0267");
        let entry = validate_row(&row).unwrap();
        assert_eq!(entry.pharmacy.latitude.as_deref(), Some("5.3364"));
        assert_eq!(entry.pharmacy.longitude.as_deref(), Some("-4.0267"));
    }
}
