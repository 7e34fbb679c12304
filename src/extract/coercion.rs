use calamine::Data;
use tracing::debug;

/// Convert a raw cell into a non-negative count, 0 when it isn't a usable number
///
/// Never fails: text such as "N/D" or "-", blank cells, booleans, dates and
/// Excel error cells all come back as 0.
pub fn coerce_cell(cell: &Data) -> f64 {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_number(s).unwrap_or(0.0),
        Data::Empty => 0.0,
        other => {
            debug!("Non-numeric cell {:?} coerced to 0", other);
            0.0
        }
    };

    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a numeric string, tolerating surrounding whitespace and a leading '+'
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.trim_start_matches('+').parse::<f64>().ok()
}
