use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::core::error::{AppError, Result};

/// One spreadsheet row after cell coercion, keyed by header name.
/// Header matching is case-sensitive; cells that coerce to an empty string
/// are absent.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse the first worksheet of an XLSX workbook into raw rows.
///
/// The first row is the header; every following row becomes a [`RawRow`]
/// with its cells keyed by the header cell of the same column. Only the
/// first sheet is read. An unreadable workbook is a bad request, not a
/// server error.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::BadRequest(format!("Unreadable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::BadRequest("Workbook has no sheets".to_string()))?
        .map_err(|e| AppError::BadRequest(format!("Unreadable sheet: {}", e)))?;

    let mut rows = range.rows();

    let headers: Vec<Option<String>> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };

    let mut parsed = Vec::new();
    for row in rows {
        let mut raw = RawRow::default();
        for (i, cell) in row.iter().enumerate() {
            let Some(Some(column)) = headers.get(i).map(Option::as_ref) else {
                continue;
            };
            if let Some(value) = cell_to_string(cell) {
                raw.insert(column.clone(), value);
            }
        }
        if !raw.is_empty() {
            parsed.push(raw);
        }
    }

    Ok(parsed)
}

/// Coerce a cell to a trimmed string, `None` when empty or uncoercible.
///
/// Numeric cells are common for phone numbers, so integral floats render
/// without a fractional part. Date cells render as ISO `YYYY-MM-DD`, which
/// is what the row validator expects for the window columns.
fn cell_to_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) | Data::DurationIso(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| ndt.date().format("%Y-%m-%d").to_string())?,
        Data::DateTimeIso(s) => s.split('T').next().unwrap_or("").trim().to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_cells_are_trimmed() {
        assert_eq!(
            cell_to_string(&Data::String("  Pharmacie Centrale  ".to_string())),
            Some("Pharmacie Centrale".to_string())
        );
        assert_eq!(cell_to_string(&Data::String("   ".to_string())), None);
    }

    #[test]
    fn test_empty_and_error_cells_coerce_to_nothing() {
        assert_eq!(cell_to_string(&Data::Empty), None);
    }

    #[test]
    fn test_numeric_phone_cell_renders_without_fraction() {
        // Excel stores a phone number typed as digits as a float.
        assert_eq!(
            cell_to_string(&Data::Float(22512345678.0)),
            Some("22512345678".to_string())
        );
        assert_eq!(cell_to_string(&Data::Int(42)), Some("42".to_string()));
    }

    #[test]
    fn test_fractional_float_keeps_decimals() {
        assert_eq!(cell_to_string(&Data::Float(5.3364)), Some("5.3364".to_string()));
    }

    #[test]
    fn test_iso_datetime_cell_keeps_date_part() {
        assert_eq!(
            cell_to_string(&Data::DateTimeIso("2024-01-01T00:00:00".to_string())),
            Some("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_raw_row_lookup_is_case_sensitive() {
        let mut row = RawRow::default();
        row.insert("nom", "Pharmacie Centrale");
        assert_eq!(row.get("nom"), Some("Pharmacie Centrale"));
        assert_eq!(row.get("Nom"), None);
    }
}
