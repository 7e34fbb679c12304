use calamine::{Data, Range};
use tracing::debug;

use crate::error::IngestError;
use crate::extract::table::cell_text;
use crate::profile::HeaderMarker;

/// Where a header marker was found, relative to the start of the sheet range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    pub row_index: usize,
    /// Column of the first cell carrying the marker text
    pub column_offset: usize,
}

/// Find the first row carrying any of `markers`
///
/// Rows are scanned top to bottom and the lowest matching index wins; markers
/// are compared case-insensitively. Fails with `HeaderNotFound` when no row
/// matches, including on an empty sheet.
pub fn locate_header(
    range: &Range<Data>,
    sheet: &str,
    markers: &[HeaderMarker],
) -> Result<HeaderLocation, IngestError> {
    let needles: Vec<(bool, String)> = markers
        .iter()
        .map(|m| match m {
            HeaderMarker::Phrase(p) => (false, p.trim().to_lowercase()),
            HeaderMarker::Cell(c) => (true, c.trim().to_lowercase()),
        })
        .filter(|(_, text)| !text.is_empty())
        .collect();

    for (row_index, row) in range.rows().enumerate() {
        let cells: Vec<Option<String>> = row
            .iter()
            .map(|c| cell_text(c).map(|t| t.to_lowercase()))
            .collect();

        let joined = cells
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        for (exact_cell, needle) in &needles {
            let matched = if *exact_cell {
                cells.iter().any(|c| c.as_deref() == Some(needle.as_str()))
            } else {
                joined.contains(needle.as_str())
            };
            if !matched {
                continue;
            }

            let column_offset = cells
                .iter()
                .position(|c| match c {
                    Some(text) if *exact_cell => text == needle,
                    Some(text) => text.contains(needle.as_str()),
                    None => false,
                })
                .unwrap_or(0);

            debug!(
                "Header marker '{}' found in sheet '{}' at row {}, col {}",
                needle, sheet, row_index, column_offset
            );
            return Ok(HeaderLocation {
                row_index,
                column_offset,
            });
        }
    }

    Err(IngestError::HeaderNotFound {
        sheet: sheet.to_string(),
        markers: markers.iter().map(|m| m.text().to_string()).collect(),
    })
}
