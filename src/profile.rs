/// Per-kind extraction profiles
///
/// A profile is everything the pipeline knows about where a dataset lives in a
/// yearly workbook: which sheet, how to find its header, which rows are light or
/// heavy vehicles and how the month columns are laid out.
use crate::models::DatasetKind;

/// Text used to recognize the header row (or the row a fixed distance above it)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMarker {
    /// Case-insensitive substring of the row's concatenated text
    Phrase(String),
    /// A single cell whose trimmed text equals the marker, case-insensitive
    Cell(String),
}

impl HeaderMarker {
    pub fn phrase(text: impl Into<String>) -> Self {
        HeaderMarker::Phrase(text.into())
    }

    pub fn cell(text: impl Into<String>) -> Self {
        HeaderMarker::Cell(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            HeaderMarker::Phrase(s) | HeaderMarker::Cell(s) => s,
        }
    }
}

/// How the twelve month columns are found once the header is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthLayout {
    /// Each month has its own header label ("Jan", "Fev", "Março", ...)
    ByName,
    /// The column headed by the report year holds January and the next eleven
    /// columns hold February through December
    YearAnchored,
}

/// Rows belonging to one vehicle category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabelSet {
    /// Substrings that identify the column holding this category's labels
    pub keywords: Vec<String>,
    /// Exact (trimmed) row labels summed into the category
    pub labels: Vec<String>,
}

impl CategoryLabelSet {
    pub fn new(keywords: &[&str], labels: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionProfile {
    pub kind: DatasetKind,
    pub sheet_name: String,
    pub markers: Vec<HeaderMarker>,
    /// Rows between the marker row and the first header row
    pub header_row_offset: usize,
    /// 1 for a plain header, 2 when a category row sits above the column names
    pub header_rows: usize,
    pub month_layout: MonthLayout,
    pub light: CategoryLabelSet,
    pub heavy: CategoryLabelSet,
}

impl ExtractionProfile {
    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Sales => Self::sales(),
            DatasetKind::Production => Self::production(),
        }
    }

    /// Registrations sheet
    ///
    /// The table title "Emplacamento Total de Autoveículos" sits three rows above
    /// a two-row header whose second row carries the month names.
    pub fn sales() -> Self {
        Self {
            kind: DatasetKind::Sales,
            sheet_name: "I. Emplacamento".to_string(),
            markers: vec![HeaderMarker::phrase("emplacamento total de autoveículos")],
            header_row_offset: 3,
            header_rows: 2,
            month_layout: MonthLayout::ByName,
            light: CategoryLabelSet::new(
                &["automóveis", "comerciais leves"],
                &["Automóveis", "Comerciais leves"],
            ),
            heavy: CategoryLabelSet::new(&["caminhões", "ônibus"], &["Caminhões", "Ônibus"]),
        }
    }

    /// Production sheet
    ///
    /// The header row is the one with a "Unidades" cell; months are unlabeled and
    /// start at the column headed by the report year.
    pub fn production() -> Self {
        Self {
            kind: DatasetKind::Production,
            sheet_name: "VI. Produção".to_string(),
            markers: vec![HeaderMarker::cell("Unidades")],
            header_row_offset: 0,
            header_rows: 1,
            month_layout: MonthLayout::YearAnchored,
            light: CategoryLabelSet::new(
                &["automóveis", "comerciais leves"],
                &["Automóveis", "Comerciais leves"],
            ),
            heavy: CategoryLabelSet::new(
                &["semipesados", "rodoviário", "urbano"],
                &[
                    "Semileves",
                    "Leves",
                    "Médios",
                    "Semipesados",
                    "Pesados",
                    "Rodoviário",
                    "Urbano",
                ],
            ),
        }
    }

    pub fn marker_texts(&self) -> Vec<String> {
        self.markers.iter().map(|m| m.text().to_string()).collect()
    }
}
