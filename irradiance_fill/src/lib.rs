//! Gap-filling for multi-year solar-irradiance worksheets.
//!
//! The workbook holds one sheet per month, shaped as one row per 5-minute
//! time slot with a `Date` column, a `Day` column and one column per year.
//! [`fill_missing`] replaces each missing reading with the mean of the same
//! time slot across the other years.

pub mod impute;
pub mod output;
pub mod table;
pub mod xlsx;

pub use impute::{fill_missing, FillReport};
pub use table::IrradianceTable;
