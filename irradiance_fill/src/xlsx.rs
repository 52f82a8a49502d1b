use anyhow::{ensure, Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use chrono::NaiveDateTime;
use std::path::Path;

use crate::table::IrradianceTable;

/// Lists the worksheets of a workbook (one per calendar month).
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    Ok(workbook.sheet_names().to_owned())
}

/// Loads one monthly worksheet into an [`IrradianceTable`].
///
/// Expected layout: a header row (`Date`, `Day`, then one label per year)
/// followed by one row per time slot. Everything after the first two columns
/// is taken as a year column by position; headers that do not parse as a
/// year only produce a warning.
pub fn load_sheet(path: &Path, sheet: &str) -> Result<IrradianceTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("failed to read sheet {sheet:?}"))?;

    let mut rows = range.rows();
    let header = rows.next().with_context(|| format!("sheet {sheet:?} is empty"))?;
    ensure!(
        header.len() >= 2,
        "sheet {sheet:?} has {} columns, need at least the Date and Day columns",
        header.len()
    );

    let year_labels: Vec<String> = header[2..].iter().map(header_label).collect();
    for label in &year_labels {
        if label.parse::<i32>().is_err() {
            log::warn!("column header {label:?} does not look like a year, keeping it by position");
        }
    }

    let mut time = Vec::new();
    let mut day = Vec::new();
    let mut values = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        // 1-based Excel row number, counting the header
        let excel_row = i + 2;
        time.push(
            datetime_from_cell(&row[0])
                .with_context(|| format!("row {excel_row}: cannot read {:?} as a timestamp", row[0]))?,
        );
        day.push(
            day_from_cell(&row[1])
                .with_context(|| format!("row {excel_row}: cannot read {:?} as a day number", row[1]))?,
        );
        values.push(row[2..].iter().map(reading_from_cell).collect());
    }

    IrradianceTable::new(time, day, year_labels, values)
}

/// Renders a header cell as a column label; integral floats (how Excel
/// stores a year typed as a number) come out without the trailing `.0`.
fn header_label(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn datetime_from_cell(cell: &Data) -> Option<NaiveDateTime> {
    cell.as_datetime().or_else(|| match cell {
        Data::String(s) => NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").ok(),
        _ => None,
    })
}

fn day_from_cell(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An irradiance cell. Empty cells, error cells and the literal string
/// "NaN" are missing; numeric cells (including zero) are readings.
fn reading_from_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_nan() => None,
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                None
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}
