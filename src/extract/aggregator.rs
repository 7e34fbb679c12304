use calamine::Data;
use tracing::debug;

use crate::extract::coercion::coerce_cell;
use crate::extract::table::{cell_text, Table};
use crate::models::MonthlySeries;

/// Sum the month columns of every row whose label equals one of `labels`
///
/// Labels are compared after trimming the cell text; matching is exact and
/// case-sensitive. Each month cell goes through [`coerce_cell`], so unreadable
/// cells add nothing. A month without a column stays at zero.
pub fn aggregate_rows(
    table: &Table,
    label_column: usize,
    months: &[Option<usize>; 12],
    labels: &[String],
) -> MonthlySeries {
    let mut series = MonthlySeries::zeros();
    let mut matched = 0;

    for row in &table.rows {
        let label = match row.get(label_column).and_then(cell_text) {
            Some(label) => label,
            None => continue,
        };
        if !labels.iter().any(|l| l.trim() == label) {
            continue;
        }

        matched += 1;
        for (month, column) in months.iter().enumerate() {
            if let Some(col) = column {
                series.add(month, coerce_cell(row.get(*col).unwrap_or(&Data::Empty)));
            }
        }
    }

    debug!(
        "Aggregated {} row(s) matching {:?}: total {}",
        matched,
        labels,
        series.total()
    );
    series
}
