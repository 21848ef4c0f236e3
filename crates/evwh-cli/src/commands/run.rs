//! Run command implementation - extract, transform, load

use anyhow::{Context, Result};
use evwh_core::Field;
use evwh_db::{DuckDbBackend, Warehouse};
use evwh_transform::{run_pipeline, PipelineOptions, RunReport};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{extract_dataset, load_config};

/// Execute the run command
pub(crate) fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;

    let (dataset, ingest_report) = extract_dataset(args.input.as_deref(), &config)?;
    if global.verbose && !ingest_report.ignored_headers.is_empty() {
        eprintln!(
            "[verbose] Ignored columns: {}",
            ingest_report.ignored_headers.join(", ")
        );
    }

    let options = PipelineOptions::from_config(&config.imputation);
    let output = run_pipeline(dataset, &options);

    let db_path = args.database.as_ref().unwrap_or(&config.database.path);
    let db = DuckDbBackend::new(db_path).context("Failed to connect to database")?;

    println!("Loading {} tables into {}...\n", output.schema.tables().len(), db_path);
    let written = db
        .replace_all(&output.schema.tables())
        .context("Failed to load star schema")?;
    for (table, rows) in &written {
        println!("  ✓ {} ({} rows)", table, rows);
    }

    println!();
    print!("{}", render_report(&output.report));
    Ok(())
}

/// Encodings whose full code table is printed after a run.
const LISTED_ENCODINGS: [Field; 2] = [Field::EvTypeCode, Field::CafvCode];

fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Extracted: {} records\n", report.extracted));
    out.push_str(&format!(
        "Dropped:   {} records missing a required identifier\n",
        report.dropped
    ));

    let filled: Vec<String> = report
        .filled
        .iter()
        .map(|(field, count)| format!("{}={}", field, count))
        .collect();
    if !filled.is_empty() {
        out.push_str(&format!("Imputed:   {}\n", filled.join(", ")));
    }

    for encoding in &report.encodings {
        out.push_str(&format!(
            "Encoded:   {} -> {} ({} categories)\n",
            encoding.spec.source,
            encoding.spec.code,
            encoding.len()
        ));
        if LISTED_ENCODINGS.contains(&encoding.spec.code) {
            for (code, value) in encoding.mapping() {
                out.push_str(&format!("    {:>3}  {}\n", code, value));
            }
        }
    }

    for (role, count) in report.fallbacks.iter().filter(|(_, n)| **n > 0) {
        out.push_str(&format!(
            "  ⚠ {} fact rows fell back to {} key 1\n",
            count, role
        ));
    }

    out.push_str(&format!("Load date: {}\n", report.load_date));
    out
}
