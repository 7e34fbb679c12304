// Tolerant extraction of monthly light/heavy series from yearly report sheets
//
// Stages, in the order the pipeline runs them:
// - header_locator: find the marker row among title/noise rows
// - table: re-read the sheet below the located header
// - column_classifier: pick label and month columns
// - aggregator: sum matching rows into a 12-month series
// - normalizer: repair unit-scale anomalies
//
// coercion turns individual cells into numbers for all of the above.

pub mod aggregator;
pub mod coercion;
pub mod column_classifier;
pub mod header_locator;
pub mod normalizer;
pub mod table;

pub use aggregator::aggregate_rows;
pub use coercion::coerce_cell;
pub use column_classifier::{classify_columns, ColumnMap, LabelColumnSource};
pub use header_locator::{locate_header, HeaderLocation};
pub use normalizer::{normalize_units, Normalized};
pub use table::Table;
