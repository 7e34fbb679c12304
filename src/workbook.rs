use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::IngestError;

/// Anything the pipeline can read sheets from
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    /// Read a whole sheet as an untyped grid
    fn sheet(&mut self, name: &str) -> Result<Range<Data>, IngestError>;
}

/// A yearly report workbook on disk
pub struct XlsxWorkbook {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl XlsxWorkbook {
    /// Open the workbook at `path`
    ///
    /// A missing file is `FileNotFound`; a file calamine cannot read as xlsx is
    /// `WorkbookOpen`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        let workbook: Xlsx<BufReader<File>> = match open_workbook(path) {
            Ok(wb) => wb,
            Err(e) => return Err(IngestError::WorkbookOpen(e.to_string())),
        };

        info!(
            "Opened workbook {} ({} sheets)",
            path.display(),
            workbook.sheet_names().len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn sheet(&mut self, name: &str) -> Result<Range<Data>, IngestError> {
        match self.workbook.worksheet_range(name) {
            Ok(range) => {
                debug!("Read sheet '{}': {:?} cells", name, range.get_size());
                Ok(range)
            }
            Err(_) => Err(IngestError::SheetNotFound(name.to_string())),
        }
    }
}

/// Sheets held in memory, keyed by name in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, Range<Data>)>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, range: Range<Data>) -> Self {
        self.sheets.push((name.into(), range));
        self
    }
}

impl SheetSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet(&mut self, name: &str) -> Result<Range<Data>, IngestError> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, range)| range.clone())
            .ok_or_else(|| IngestError::SheetNotFound(name.to_string()))
    }
}
