use calamine::{Data, Range};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

use crate::error::IngestError;
use crate::extract::{
    aggregate_rows, classify_columns, locate_header, normalize_units, HeaderLocation,
    LabelColumnSource, Table,
};
use crate::models::{DatasetKind, YearlyDataset};
use crate::profile::ExtractionProfile;
use crate::store::DatasetStore;
use crate::workbook::{SheetSource, XlsxWorkbook};

/// One yearly workbook to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSource {
    pub year: String,
    pub path: PathBuf,
    /// Header text of the production sheet's January column
    pub year_column: String,
}

/// Progress of a single (year, kind) job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    HeaderLocated,
    Classified,
    Aggregated,
    Normalized,
    Stored,
    Failed,
    FallbackStored,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A structural error plus the last state the job reached before it
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed after reaching {stage}: {source}")]
pub struct JobFailure {
    pub stage: JobState,
    #[source]
    pub source: IngestError,
}

#[derive(Debug, Clone)]
pub enum JobOutcome {
    Stored {
        light_rescaled: bool,
        heavy_rescaled: bool,
        /// A label column was guessed by position rather than found by keyword
        positional_fallback: bool,
    },
    FallbackStored(JobFailure),
}

#[derive(Debug, Clone)]
pub struct JobReport {
    pub year: String,
    pub kind: DatasetKind,
    pub outcome: JobOutcome,
}

impl JobReport {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, JobOutcome::FallbackStored(_))
    }

    pub fn failure(&self) -> Option<&JobFailure> {
        match &self.outcome {
            JobOutcome::FallbackStored(failure) => Some(failure),
            JobOutcome::Stored { .. } => None,
        }
    }
}

/// Store built at startup plus what happened to each job
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub store: DatasetStore,
    pub reports: Vec<JobReport>,
}

impl LoadSummary {
    pub fn fallback_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_fallback()).count()
    }
}

/// A successful extraction, before it is stored
#[derive(Debug, Clone)]
pub struct Extraction {
    pub sheet: String,
    pub header: HeaderLocation,
    pub dataset: YearlyDataset,
    pub light_rescaled: bool,
    pub heavy_rescaled: bool,
    pub positional_fallback: bool,
}

/// Runs every (year, kind) extraction job and collects the results in a store
pub struct DatasetPipeline {
    profiles: Vec<ExtractionProfile>,
}

impl Default for DatasetPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetPipeline {
    /// Pipeline with the sales and production profiles
    pub fn new() -> Self {
        Self::with_profiles(DatasetKind::ALL.map(ExtractionProfile::for_kind).to_vec())
    }

    pub fn with_profiles(profiles: Vec<ExtractionProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[ExtractionProfile] {
        &self.profiles
    }

    /// Load every configured workbook from disk
    ///
    /// Never fails: each job that hits a structural error stores the zero
    /// fallback dataset and the batch carries on.
    #[instrument(skip(self, sources), fields(sources = sources.len()))]
    pub fn load_all(&self, sources: &[ReportSource]) -> LoadSummary {
        let mut summary = LoadSummary::default();

        for source in sources {
            info!(
                "Loading report year {} from {}",
                source.year,
                source.path.display()
            );
            let workbook = XlsxWorkbook::open(&source.path);
            let reports = self.load_year(
                &source.year,
                &source.year_column,
                workbook,
                &mut summary.store,
            );
            summary.reports.extend(reports);
        }

        info!(
            "Loaded {} dataset(s), {} fallback(s)",
            summary.reports.len(),
            summary.fallback_count()
        );
        summary
    }

    /// Run every profile against one year's workbook and store the results
    ///
    /// An error opening the workbook fails all of that year's jobs.
    pub fn load_year<S: SheetSource>(
        &self,
        year: &str,
        year_column: &str,
        workbook: Result<S, IngestError>,
        store: &mut DatasetStore,
    ) -> Vec<JobReport> {
        let mut workbook = workbook;
        let mut reports = Vec::with_capacity(self.profiles.len());

        for profile in &self.profiles {
            let result = match workbook.as_mut() {
                Ok(source) => self.run_job(source, profile, year_column),
                Err(e) => Err(JobFailure {
                    stage: JobState::Pending,
                    source: e.clone(),
                }),
            };

            let outcome = match result {
                Ok(extraction) => {
                    store.insert(profile.kind, year, extraction.dataset);
                    debug!("{} {}: {}", profile.kind, year, JobState::Stored);
                    JobOutcome::Stored {
                        light_rescaled: extraction.light_rescaled,
                        heavy_rescaled: extraction.heavy_rescaled,
                        positional_fallback: extraction.positional_fallback,
                    }
                }
                Err(failure) => {
                    error!(
                        "Failed to load {} for {} ({}); storing zero fallback",
                        profile.kind, year, failure
                    );
                    store.insert(profile.kind, year, YearlyDataset::fallback());
                    debug!(
                        "{} {}: {} -> {}",
                        profile.kind,
                        year,
                        JobState::Failed,
                        JobState::FallbackStored
                    );
                    JobOutcome::FallbackStored(failure)
                }
            };

            reports.push(JobReport {
                year: year.to_string(),
                kind: profile.kind,
                outcome,
            });
        }

        reports
    }

    /// Extract one dataset from a workbook
    ///
    /// Nothing is stored here; the caller decides between the result and the
    /// fallback.
    #[instrument(skip(self, source, profile), fields(kind = %profile.kind))]
    pub fn run_job<S: SheetSource + ?Sized>(
        &self,
        source: &mut S,
        profile: &ExtractionProfile,
        year_column: &str,
    ) -> Result<Extraction, JobFailure> {
        let mut state = JobState::Pending;
        let fail = |stage: JobState| move |source: IngestError| JobFailure { stage, source };

        let (sheet, range, header) = resolve_sheet(source, profile).map_err(fail(state))?;
        state = advance(state, JobState::HeaderLocated);

        let header_row = header.row_index + profile.header_row_offset;
        let table = Table::from_range(&range, header_row, profile.header_rows);
        let columns = classify_columns(
            &table,
            &profile.light,
            &profile.heavy,
            profile.month_layout,
            year_column,
        )
        .map_err(fail(state))?;
        state = advance(state, JobState::Classified);

        let light = aggregate_rows(
            &table,
            columns.light_label,
            &columns.months,
            &profile.light.labels,
        );
        let heavy = aggregate_rows(
            &table,
            columns.heavy_label,
            &columns.months,
            &profile.heavy.labels,
        );
        state = advance(state, JobState::Aggregated);

        let light = normalize_units(light);
        let heavy = normalize_units(heavy);
        if light.rescaled {
            warn!("Light series exceeded unit threshold; rescaled (heuristic)");
        }
        if heavy.rescaled {
            warn!("Heavy series exceeded unit threshold; rescaled (heuristic)");
        }
        advance(state, JobState::Normalized);

        Ok(Extraction {
            sheet,
            header,
            dataset: YearlyDataset::new(light.series, heavy.series),
            light_rescaled: light.rescaled,
            heavy_rescaled: heavy.rescaled,
            positional_fallback: columns.light_source == LabelColumnSource::PositionalFallback
                || columns.heavy_source == LabelColumnSource::PositionalFallback,
        })
    }
}

fn advance(from: JobState, to: JobState) -> JobState {
    debug!("Job state {} -> {}", from, to);
    to
}

/// Find the profile's sheet and its header marker
///
/// The configured sheet name is tried first. When that sheet is missing, every
/// other sheet is scanned for the header marker instead.
fn resolve_sheet<S: SheetSource + ?Sized>(
    source: &mut S,
    profile: &ExtractionProfile,
) -> Result<(String, Range<Data>, HeaderLocation), IngestError> {
    match source.sheet(&profile.sheet_name) {
        Ok(range) => {
            let header = locate_header(&range, &profile.sheet_name, &profile.markers)?;
            Ok((profile.sheet_name.clone(), range, header))
        }
        Err(IngestError::SheetNotFound(_)) => {
            warn!(
                "Sheet '{}' not found; scanning other sheets for {:?}",
                profile.sheet_name,
                profile.marker_texts()
            );
            for name in source.sheet_names() {
                let range = match source.sheet(&name) {
                    Ok(range) => range,
                    Err(_) => continue,
                };
                if let Ok(header) = locate_header(&range, &name, &profile.markers) {
                    info!("Using sheet '{}' for {}", name, profile.kind);
                    return Ok((name, range, header));
                }
            }
            Err(IngestError::SheetNotFound(profile.sheet_name.clone()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::table::range_from_rows;
    use crate::workbook::InMemoryWorkbook;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn production_sheet(year: &str, light: f64, heavy: f64) -> Range<Data> {
        let mut header = vec![s("Unidades"), Data::Empty, s(year)];
        header.extend((0..11).map(|_| Data::Empty));
        let data_row = |label: &str, value: f64| {
            let mut row = vec![s(label), Data::Empty];
            row.extend((0..12).map(|_| Data::Float(value)));
            row
        };
        range_from_rows(vec![
            vec![s("VI. Produção de autoveículos")],
            vec![Data::Empty],
            header,
            data_row("Automóveis", light),
            data_row("Comerciais leves", light),
            data_row("Semipesados", heavy),
            data_row("Urbano", heavy),
        ])
    }

    #[test]
    fn test_run_job_production_sheet() {
        let pipeline = DatasetPipeline::new();
        let mut workbook =
            InMemoryWorkbook::new().with_sheet("VI. Produção", production_sheet("2024", 100.0, 5.0));

        let extraction = pipeline
            .run_job(&mut workbook, &ExtractionProfile::production(), "2024")
            .unwrap();

        assert_eq!(extraction.sheet, "VI. Produção");
        assert_eq!(extraction.header.row_index, 2);
        assert_eq!(extraction.dataset.light.values(), &[200.0; 12]);
        assert_eq!(extraction.dataset.heavy.values(), &[10.0; 12]);
        assert!(!extraction.positional_fallback);
    }

    #[test]
    fn test_sheet_found_by_marker_when_renamed() {
        let pipeline = DatasetPipeline::new();
        let mut workbook = InMemoryWorkbook::new()
            .with_sheet("Capa", range_from_rows(vec![vec![s("Anuário")]]))
            .with_sheet("6. Produção", production_sheet("2023", 1.0, 1.0));

        let extraction = pipeline
            .run_job(&mut workbook, &ExtractionProfile::production(), "2023")
            .unwrap();
        assert_eq!(extraction.sheet, "6. Produção");
    }

    #[test]
    fn test_missing_sheet_fails_pending() {
        let pipeline = DatasetPipeline::new();
        let mut workbook =
            InMemoryWorkbook::new().with_sheet("Capa", range_from_rows(vec![vec![s("Anuário")]]));

        let failure = pipeline
            .run_job(&mut workbook, &ExtractionProfile::sales(), "2023")
            .unwrap_err();
        assert_eq!(failure.stage, JobState::Pending);
        assert!(matches!(failure.source, IngestError::SheetNotFound(_)));
    }

    #[test]
    fn test_open_error_fails_every_kind_for_the_year() {
        let pipeline = DatasetPipeline::new();
        let mut store = DatasetStore::new();

        let reports = pipeline.load_year::<InMemoryWorkbook>(
            "2023",
            "2023",
            Err(IngestError::FileNotFound(PathBuf::from("missing.xlsx"))),
            &mut store,
        );

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(JobReport::is_fallback));
        for kind in DatasetKind::ALL {
            assert_eq!(store.get(kind, "2023"), Some(&YearlyDataset::fallback()));
        }
    }

    #[test]
    fn test_job_failure_display_names_stage() {
        let failure = JobFailure {
            stage: JobState::HeaderLocated,
            source: IngestError::ColumnNotFound("light".to_string()),
        };
        let message = failure.to_string();
        assert!(message.contains("HeaderLocated"));
        assert!(message.contains("light"));
    }
}
