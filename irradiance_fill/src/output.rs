use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;

use crate::table::IrradianceTable;

/// Writes the table as CSV: `Date,Day,<years...>` header, one row per time
/// slot. Missing readings become empty fields so a round trip keeps them
/// distinct from zero.
pub fn write_csv<W: Write>(table: &IrradianceTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = Vec::with_capacity(2 + table.n_years());
    header.push("Date".to_string());
    header.push("Day".to_string());
    header.extend(table.year_labels.iter().cloned());
    wtr.write_record(&header)?;

    for i in 0..table.n_slots() {
        let mut record = Vec::with_capacity(2 + table.n_years());
        record.push(table.time[i].format("%Y-%m-%d %H:%M:%S").to_string());
        record.push(table.day[i].to_string());
        for cell in &table.rows[i] {
            record.push(match cell {
                Some(v) => v.to_string(),
                None => String::new(),
            });
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
