use calamine::{Data, Range};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sheet contents below a located header, with one name per column
///
/// A column whose header cells are all blank is *unlabeled* (`None`).
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<Option<String>>,
    pub rows: Vec<Vec<Data>>,
}

impl Table {
    /// Re-read `range` using `header_row` as the first header row
    ///
    /// With `header_rows == 2` a column is named by the second row when that cell
    /// is non-blank, otherwise by the first row. Data rows start right after the
    /// header rows. Rows past the end of the sheet yield an empty table.
    pub fn from_range(range: &Range<Data>, header_row: usize, header_rows: usize) -> Self {
        let (height, width) = range.get_size();
        let header_rows = header_rows.max(1);

        let mut headers = vec![None; width];
        for row in header_row..(header_row + header_rows).min(height) {
            for (col, header) in headers.iter_mut().enumerate() {
                if let Some(text) = range.get((row, col)).and_then(header_text) {
                    *header = Some(text);
                }
            }
        }

        let rows = range
            .rows()
            .skip(header_row + header_rows)
            .map(|row| row.to_vec())
            .collect();

        Self { headers, rows }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).and_then(|h| h.as_deref())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Indices of columns with no header text, left to right
    pub fn unlabeled_columns(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Text of every non-blank cell in a column, header excluded
    pub fn column_texts(&self, col: usize) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(col).and_then(cell_text))
    }
}

/// Display text for a cell, `None` when blank
///
/// Whole floats render without a fractional part so a year stored as 2024.0 reads
/// "2024".
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Header label with line breaks removed and whitespace runs collapsed
pub fn header_text(cell: &Data) -> Option<String> {
    let raw = cell_text(cell)?;
    let joined = raw.replace(['\n', '\r'], "");
    let collapsed = WHITESPACE_RUN.replace_all(joined.trim(), " ").to_string();
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Build an in-memory range from rows of cells, mostly for tests and tooling
pub fn range_from_rows(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Range::empty();
    }

    let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
    for (r, row) in rows.into_iter().enumerate() {
        for (c, cell) in row.into_iter().enumerate() {
            range.set_value((r as u32, c as u32), cell);
        }
    }
    range
}
