use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vehicle_report_ingest::config::Config;
use vehicle_report_ingest::models::DatasetKind;
use vehicle_report_ingest::pipeline::{DatasetPipeline, JobOutcome};
use vehicle_report_ingest::store::DatasetStore;

#[instrument]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support; logs go to stderr so
    // stdout carries only the JSON store
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,vehicle_report_ingest=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!("Starting vehicle report ingest with config: {:?}", config);

    let pipeline = DatasetPipeline::new();
    let summary = pipeline.load_all(&config.report_sources());

    for report in &summary.reports {
        match &report.outcome {
            JobOutcome::Stored {
                light_rescaled,
                heavy_rescaled,
                positional_fallback,
            } => info!(
                "{} {}: stored (light rescaled: {}, heavy rescaled: {}, positional columns: {})",
                report.kind, report.year, light_rescaled, heavy_rescaled, positional_fallback
            ),
            JobOutcome::FallbackStored(failure) => {
                warn!("{} {}: zero fallback ({})", report.kind, report.year, failure)
            }
        }
    }

    // Read-only from here on; consumers share it
    let store: Arc<DatasetStore> = Arc::new(summary.store);

    for kind in DatasetKind::ALL {
        for (year, dataset) in store.get_dataset(kind) {
            info!(
                "{} {}: light total {:.0}, heavy total {:.0}",
                kind,
                year,
                dataset.total_light(),
                dataset.total_heavy()
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(store.as_ref())?);
    Ok(())
}
