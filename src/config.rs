use std::env;
use std::path::PathBuf;

use crate::pipeline::ReportSource;

const DEFAULT_YEARS: &str = "2023,2024,2025";
const DEFAULT_FILE_PATTERN: &str = "siteautoveiculos{year}.xlsx";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub years: Vec<String>,
    /// File name template; `{year}` is replaced with each report year
    pub file_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            years: parse_years(DEFAULT_YEARS),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the environment, defaulting anything unset or blank
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let years = env::var("REPORT_YEARS")
            .map(|raw| parse_years(&raw))
            .ok()
            .filter(|years| !years.is_empty())
            .unwrap_or(defaults.years);

        Config {
            data_dir: env::var("REPORT_DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            years,
            file_pattern: env::var("REPORT_FILE_PATTERN")
                .ok()
                .filter(|v| v.contains("{year}"))
                .unwrap_or(defaults.file_pattern),
        }
    }

    /// The (year, file, expected year column) tuples the pipeline loads, one per year
    pub fn report_sources(&self) -> Vec<ReportSource> {
        self.years
            .iter()
            .map(|year| ReportSource {
                year: year.clone(),
                path: self.data_dir.join(self.file_pattern.replace("{year}", year)),
                year_column: year.clone(),
            })
            .collect()
    }
}

/// Comma or whitespace separated year labels; anything that isn't a 4-digit
/// year is dropped
fn parse_years(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}
