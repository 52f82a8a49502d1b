use anyhow::{ensure, Result};
use chrono::NaiveDateTime;

/// One monthly worksheet held in memory: one row per recurring time-of-day
/// slot, one value column per calendar year.
///
/// The two identifier columns (`time`, `day`) are never touched by any
/// transformation in this crate. A missing reading is `None`, which is not
/// the same thing as a legitimate `Some(0.0)` (nighttime irradiance is zero,
/// not absent).
#[derive(Debug, Clone, PartialEq)]
pub struct IrradianceTable {
    pub time: Vec<NaiveDateTime>,
    pub day: Vec<i64>,
    pub year_labels: Vec<String>,
    /// One inner vector per time slot, `year_labels.len()` entries each.
    pub rows: Vec<Vec<Option<f64>>>,
}

impl IrradianceTable {
    /// Builds a table, checking that the columns line up.
    ///
    /// A table with zero year columns is legal; a ragged row or identifier
    /// columns of different lengths are not.
    pub fn new(
        time: Vec<NaiveDateTime>,
        day: Vec<i64>,
        year_labels: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        ensure!(
            time.len() == day.len(),
            "time column has {} entries but day column has {}",
            time.len(),
            day.len()
        );
        ensure!(
            time.len() == rows.len(),
            "identifier columns have {} entries but there are {} value rows",
            time.len(),
            rows.len()
        );
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == year_labels.len(),
                "row {} has {} values but there are {} year columns",
                i,
                row.len(),
                year_labels.len()
            );
        }
        Ok(Self {
            time,
            day,
            year_labels,
            rows,
        })
    }

    pub fn n_slots(&self) -> usize {
        self.rows.len()
    }

    pub fn n_years(&self) -> usize {
        self.year_labels.len()
    }

    /// Number of missing readings across all year columns.
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_none()).count())
            .sum()
    }

    /// Readings for one year column, slot by slot.
    pub fn year_series(&self, year_idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row[year_idx])
    }
}
