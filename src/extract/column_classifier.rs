use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::extract::table::Table;
use crate::profile::{CategoryLabelSet, MonthLayout};

static LEADING_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+").unwrap());

/// Full month names (Portuguese, English), accent-folded, January first
const MONTH_NAMES: [(&str, &str); 12] = [
    ("janeiro", "january"),
    ("fevereiro", "february"),
    ("marco", "march"),
    ("abril", "april"),
    ("maio", "may"),
    ("junho", "june"),
    ("julho", "july"),
    ("agosto", "august"),
    ("setembro", "september"),
    ("outubro", "october"),
    ("novembro", "november"),
    ("dezembro", "december"),
];

/// How a label column was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColumnSource {
    /// Its cells contain one of the category keywords
    Keyword,
    /// No column matched, so it was guessed from the position of unlabeled
    /// columns. Nothing verifies this guess.
    PositionalFallback,
}

/// Columns resolved for one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub light_label: usize,
    pub light_source: LabelColumnSource,
    pub heavy_label: usize,
    pub heavy_source: LabelColumnSource,
    /// Column per month, January first; `None` means the month reads as zero
    pub months: [Option<usize>; 12],
}

impl ColumnMap {
    pub fn missing_months(&self) -> usize {
        self.months.iter().filter(|m| m.is_none()).count()
    }
}

/// Resolve the light/heavy label columns and the twelve month columns
///
/// The label column for a category is the first column whose values contain
/// one of its keywords. When nothing matches, heavy falls back to the first
/// unlabeled column and light to the last one; that fallback is a last resort
/// and is logged. Only a label column that cannot be found either way is an
/// error; unmatched months are left empty.
pub fn classify_columns(
    table: &Table,
    light: &CategoryLabelSet,
    heavy: &CategoryLabelSet,
    layout: MonthLayout,
    year_column: &str,
) -> Result<ColumnMap, IngestError> {
    let unlabeled = table.unlabeled_columns();

    let (heavy_label, heavy_source) = match find_keyword_column(table, &heavy.keywords) {
        Some(col) => (col, LabelColumnSource::Keyword),
        None => {
            let col = *unlabeled
                .first()
                .ok_or_else(|| IngestError::ColumnNotFound("heavy".to_string()))?;
            warn!(
                "No column matched heavy keywords {:?}; guessing first unlabeled column {}",
                heavy.keywords, col
            );
            (col, LabelColumnSource::PositionalFallback)
        }
    };

    let (light_label, light_source) = match find_keyword_column(table, &light.keywords) {
        Some(col) => (col, LabelColumnSource::Keyword),
        None => {
            let col = *unlabeled
                .last()
                .ok_or_else(|| IngestError::ColumnNotFound("light".to_string()))?;
            warn!(
                "No column matched light keywords {:?}; guessing last unlabeled column {}",
                light.keywords, col
            );
            (col, LabelColumnSource::PositionalFallback)
        }
    };

    let months = match layout {
        MonthLayout::ByName => months_by_name(table),
        MonthLayout::YearAnchored => match find_year_column(table, year_column) {
            Some(anchor) => months_from_anchor(table, anchor),
            None => {
                warn!(
                    "Year column '{}' not found; falling back to month names",
                    year_column
                );
                months_by_name(table)
            }
        },
    };

    let map = ColumnMap {
        light_label,
        light_source,
        heavy_label,
        heavy_source,
        months,
    };

    debug!(
        "Classified columns: light label {}, heavy label {}, months {:?}",
        map.light_label, map.heavy_label, map.months
    );
    if map.missing_months() > 0 {
        warn!("{} month column(s) not found, read as zero", map.missing_months());
    }

    Ok(map)
}

/// First column whose cell texts contain any keyword (case-insensitive)
fn find_keyword_column(table: &Table, keywords: &[String]) -> Option<usize> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    (0..table.width()).find(|&col| {
        table.column_texts(col).any(|text| {
            let text = text.to_lowercase();
            keywords.iter().any(|k| text.contains(k.as_str()))
        })
    })
}

fn find_year_column(table: &Table, year_column: &str) -> Option<usize> {
    let year_column = year_column.trim();
    (0..table.width()).find(|&col| table.header(col) == Some(year_column))
}

fn months_from_anchor(table: &Table, anchor: usize) -> [Option<usize>; 12] {
    std::array::from_fn(|i| Some(anchor + i).filter(|col| *col < table.width()))
}

fn months_by_name(table: &Table) -> [Option<usize>; 12] {
    let mut months = [None; 12];
    for col in 0..table.width() {
        if let Some(month) = table.header(col).and_then(match_month) {
            if months[month].is_none() {
                months[month] = Some(col);
            }
        }
    }
    months
}

/// Month index (0 = January) for a header such as "Jan", "fev.", "Março",
/// "SEPT" or "jan/24"
///
/// The leading word must have at least three letters and be a prefix of the
/// Portuguese or English month name.
pub fn match_month(header: &str) -> Option<usize> {
    let folded = fold_accents(&header.trim().to_lowercase());
    let word = LEADING_WORD.find(&folded)?.as_str();
    if word.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|(pt, en)| pt.starts_with(word) || en.starts_with(word))
}

fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
