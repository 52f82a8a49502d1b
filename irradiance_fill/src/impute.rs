use crate::table::IrradianceTable;

/// Summary of one fill pass, returned alongside the filled table so callers
/// can assert on it instead of scraping log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    /// The columns that were treated as year columns.
    pub year_columns: Vec<String>,
    pub missing_before: usize,
    pub missing_after: usize,
}

/// Fills missing readings with the mean of the same time slot across years.
///
/// Each row is handled independently: the mean of the row's present values
/// replaces every `None` in that row, and present values are never
/// overwritten. A row with no present values at all stays fully missing --
/// the imputer does not guess in the total-absence case, and any secondary
/// strategy (temporal interpolation, nighttime zero) is the caller's call.
///
/// The input is untouched; a fresh table with the same shape and the same
/// identifier columns comes back.
pub fn fill_missing(table: &IrradianceTable) -> (IrradianceTable, FillReport) {
    let mut missing_before = 0usize;
    let mut missing_after = 0usize;
    let mut filled_rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        // One pass: running sum and count of the present values, so the
        // "mean undefined when nothing is present" case stays explicit.
        let mut sum = 0.0;
        let mut count = 0usize;
        for cell in row {
            match cell {
                Some(v) => {
                    sum += v;
                    count += 1;
                }
                None => missing_before += 1,
            }
        }

        if count == 0 {
            missing_after += row.len();
            filled_rows.push(row.clone());
            continue;
        }

        let mean = sum / count as f64;
        filled_rows.push(row.iter().map(|cell| cell.or(Some(mean))).collect());
    }

    let filled = IrradianceTable {
        time: table.time.clone(),
        day: table.day.clone(),
        year_labels: table.year_labels.clone(),
        rows: filled_rows,
    };
    let report = FillReport {
        year_columns: table.year_labels.clone(),
        missing_before,
        missing_after,
    };
    (filled, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t(min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, min, 0)
            .unwrap()
    }

    fn table(rows: Vec<Vec<Option<f64>>>) -> IrradianceTable {
        let n = rows.len();
        let labels = (0..rows.first().map_or(0, Vec::len))
            .map(|i| (2013 + i).to_string())
            .collect();
        IrradianceTable::new(
            (0..n).map(|i| t(5 * i as u32)).collect(),
            vec![1; n],
            labels,
            rows,
        )
        .unwrap()
    }

    #[test]
    fn fills_gaps_with_row_mean() {
        let input = table(vec![vec![Some(0.1), None, None, Some(0.12)]]);
        let (filled, _) = fill_missing(&input);
        let row = &filled.rows[0];
        assert_eq!(row[0], Some(0.1));
        assert!((row[1].unwrap() - 0.11).abs() < 1e-12);
        assert!((row[2].unwrap() - 0.11).abs() < 1e-12);
        assert_eq!(row[3], Some(0.12));
    }

    #[test]
    fn fully_missing_row_stays_missing() {
        let input = table(vec![vec![None, None, None, None]]);
        let (filled, report) = fill_missing(&input);
        assert_eq!(filled.rows[0], vec![None; 4]);
        assert_eq!(report.missing_before, 4);
        assert_eq!(report.missing_after, 4);
    }

    #[test]
    fn present_values_are_never_overwritten() {
        let input = table(vec![vec![Some(1.0), Some(2.0), None]]);
        let (filled, _) = fill_missing(&input);
        assert_eq!(filled.rows[0][0], Some(1.0));
        assert_eq!(filled.rows[0][1], Some(2.0));
    }

    #[test]
    fn zero_is_a_reading_not_a_gap() {
        let input = table(vec![vec![Some(0.0), Some(4.0), None]]);
        let (filled, report) = fill_missing(&input);
        // mean of {0.0, 4.0}, not of {4.0}
        assert!((filled.rows[0][2].unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(report.missing_before, 1);
        assert_eq!(report.missing_after, 0);
    }

    #[test]
    fn rows_are_independent() {
        let input = table(vec![
            vec![Some(10.0), None],
            vec![Some(30.0), None],
        ]);
        let (filled, _) = fill_missing(&input);
        assert_eq!(filled.rows[0][1], Some(10.0));
        assert_eq!(filled.rows[1][1], Some(30.0));
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let input = table(vec![
            vec![Some(0.1), None, Some(0.3)],
            vec![None, None, None],
        ]);
        let (once, _) = fill_missing(&input);
        let (twice, report) = fill_missing(&once);
        assert_eq!(once, twice);
        assert_eq!(report.missing_before, 3);
        assert_eq!(report.missing_after, 3);
    }

    #[test]
    fn shape_and_identifiers_preserved() {
        let input = table(vec![
            vec![Some(0.1), None],
            vec![None, Some(0.2)],
            vec![Some(0.3), Some(0.4)],
        ]);
        let (filled, report) = fill_missing(&input);
        assert_eq!(filled.time, input.time);
        assert_eq!(filled.day, input.day);
        assert_eq!(filled.year_labels, input.year_labels);
        assert_eq!(filled.n_slots(), input.n_slots());
        assert_eq!(report.year_columns, input.year_labels);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = table(vec![vec![Some(1.0), None]]);
        let before = input.clone();
        let _ = fill_missing(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let input = table(vec![]);
        let (filled, report) = fill_missing(&input);
        assert_eq!(filled.n_slots(), 0);
        assert_eq!(report.missing_before, 0);
        assert_eq!(report.missing_after, 0);
    }
}
