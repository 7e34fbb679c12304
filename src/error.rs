use std::path::PathBuf;

/// Structural failures that abort a single (year, kind) extraction job.
///
/// Cell-level parse failures never show up here; they are coerced to zero.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IngestError {
    #[error("Workbook file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Header marker not found in sheet '{sheet}' (looked for {markers:?})")]
    HeaderNotFound { sheet: String, markers: Vec<String> },

    #[error("Label column not found for {0} vehicles")]
    ColumnNotFound(String),
}
