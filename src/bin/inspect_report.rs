use calamine::DataType;
use clap::Parser;
use std::path::PathBuf;

use vehicle_report_ingest::extract::{classify_columns, locate_header, Table};
use vehicle_report_ingest::models::{DatasetKind, MONTH_LABELS};
use vehicle_report_ingest::pipeline::DatasetPipeline;
use vehicle_report_ingest::profile::ExtractionProfile;
use vehicle_report_ingest::workbook::{SheetSource, XlsxWorkbook};

#[derive(Parser)]
#[command(name = "inspect-report")]
#[command(about = "Show how a yearly report workbook is read", long_about = None)]
struct Cli {
    /// Path to the workbook (e.g. siteautoveiculos2024.xlsx)
    file: PathBuf,

    /// Dataset kind: sales or production
    #[arg(long, default_value = "sales")]
    kind: DatasetKind,

    /// Header text of the January column in the production sheet
    #[arg(long, env = "REPORT_YEAR_COLUMN")]
    year_column: String,

    /// Number of rows to print above and below the header
    #[arg(long, default_value = "3")]
    context: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut workbook = XlsxWorkbook::open(&cli.file)?;
    let profile = ExtractionProfile::for_kind(cli.kind);

    println!("Workbook: {}", workbook.path().display());
    println!("\nSheet names:");
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("  {i}: {name}");
    }

    let range = workbook.sheet(&profile.sheet_name)?;
    println!("\nSheet '{}': {:?} cells", profile.sheet_name, range.get_size());

    let header = locate_header(&range, &profile.sheet_name, &profile.markers)?;
    println!(
        "Marker row {} (col {}), header row {}",
        header.row_index,
        header.column_offset,
        header.row_index + profile.header_row_offset
    );

    println!("{}", "=".repeat(100));
    let first = header.row_index.saturating_sub(cli.context);
    let last = header.row_index + profile.header_row_offset + profile.header_rows + cli.context;
    for (row_idx, row) in range.rows().enumerate().skip(first).take(last - first) {
        print!("Row {:3}: ", row_idx);
        for cell in row.iter().take(16) {
            if cell.is_empty() {
                print!("[empty] ");
            } else {
                print!("[{cell}] ");
            }
        }
        println!();
    }
    println!("{}", "=".repeat(100));

    let table = Table::from_range(
        &range,
        header.row_index + profile.header_row_offset,
        profile.header_rows,
    );
    let columns = classify_columns(
        &table,
        &profile.light,
        &profile.heavy,
        profile.month_layout,
        &cli.year_column,
    )?;
    println!(
        "Light labels: col {} ({:?}); heavy labels: col {} ({:?})",
        columns.light_label, columns.light_source, columns.heavy_label, columns.heavy_source
    );
    for (label, column) in MONTH_LABELS.iter().zip(columns.months.iter()) {
        match column {
            Some(col) => println!("  {label}: col {col} ({:?})", table.header(*col)),
            None => println!("  {label}: not found"),
        }
    }

    let extraction = DatasetPipeline::new().run_job(&mut workbook, &profile, &cli.year_column)?;
    println!("\nLight: {:?}", extraction.dataset.light.values());
    println!("Heavy: {:?}", extraction.dataset.heavy.values());
    println!(
        "Totals: light {:.0}, heavy {:.0} (rescaled: light {}, heavy {})",
        extraction.dataset.total_light(),
        extraction.dataset.total_heavy(),
        extraction.light_rescaled,
        extraction.heavy_rescaled
    );

    Ok(())
}
