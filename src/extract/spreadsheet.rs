use super::{CellRecord, Extracted, Extractor};
use crate::error::Result;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::{Duration, NaiveDate};
use std::path::Path;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Every non-empty cell of every sheet, tagged with its sheet name.
pub struct SpreadsheetExtractor;

impl Extractor for SpreadsheetExtractor {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn extract(&self, path: &Path) -> Result<Extracted> {
        let mut workbook = open_workbook_auto(path)?;
        let mut cells = Vec::new();

        for (sheet, range) in workbook.worksheets() {
            for row in range.rows() {
                for cell in row {
                    if let Some(value) = cell_text(cell) {
                        cells.push(CellRecord {
                            sheet: sheet.clone(),
                            value,
                        });
                    }
                }
            }
        }

        Ok(Extracted::Cells(cells))
    }
}

/// String form of a cell, `None` for empty cells.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) if s.is_empty() => return None,
        Data::DateTime(dt) => excel_datetime_text(dt),
        other => other.to_string(),
    };
    Some(text)
}

fn excel_datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.as_f64().to_string();
    }
    serial_to_datetime_text(dt.as_f64()).unwrap_or_else(|| dt.as_f64().to_string())
}

/// Converts an Excel serial date (days since 1899-12-30) to
/// `YYYY-MM-DD HH:MM:SS`.
fn serial_to_datetime_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let datetime = epoch.checked_add_signed(Duration::try_seconds(seconds)?)?;
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
