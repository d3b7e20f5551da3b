//! Process command - summarize expenses across statement files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use spendr_core::statement::rules::format_amount;
use spendr_core::{
    BatchProcessor, BatchReport, CategorySummary, Diagnostic, DiagnosticLevel, Document,
    DocumentReport, SpendrConfig, Transaction,
};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Statement files or glob patterns (PDF, extracted text, or a previous CSV export)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// CSV export file (default: from config, "expenses.csv")
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Do not write the CSV export
    #[arg(long, conflicts_with = "export")]
    no_export: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print every transaction
    #[arg(long)]
    show_table: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON report
    Json,
    /// CSV in the export layout
    Csv,
}

/// Machine-readable report for `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    grand_total: Decimal,
    categories: Vec<CategorySummary>,
    documents: &'a [DocumentReport],
    transactions: &'a [Transaction],
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    info!("Found {} files to process", files.len());

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        match Document::from_path(path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                eprintln!(
                    "{} {}: {}",
                    style("✗").red(),
                    path.display(),
                    e
                );
            }
        }
    }

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let processor = BatchProcessor::from_config(&config);
    let report = processor.run_with(documents, |doc| {
        pb.set_message(doc.source.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    match args.format {
        OutputFormat::Text => print_text(&report, &config, args.show_table),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => report.ledger.write_csv(std::io::stdout().lock())?,
    }

    if !args.no_export && !report.ledger.is_empty() {
        let export_path = args
            .export
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.file_name));
        write_export(&report, &export_path)?;
        eprintln!(
            "{} Exported {} transactions to {}",
            style("✓").green(),
            report.ledger.len(),
            export_path.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Resolve each input as an existing path, or else as a glob pattern.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let matched: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();

        if matched.is_empty() {
            anyhow::bail!("No matching files found for: {}", input);
        }
        files.extend(matched);
    }

    Ok(files)
}

fn write_export(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    report.ledger.write_csv(file)?;
    debug!("Wrote export to {}", path.display());
    Ok(())
}

fn print_json(report: &BatchReport) -> anyhow::Result<()> {
    let json = JsonReport {
        generated_at: Utc::now(),
        grand_total: report.ledger.grand_total(),
        categories: report.ledger.category_breakdown(),
        documents: &report.documents,
        transactions: report.ledger.transactions(),
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_text(report: &BatchReport, config: &SpendrConfig, show_table: bool) {
    let symbol = config.extraction.currency_symbol.as_str();

    for document in &report.documents {
        println!("Processing: {}", document.source);
        for diagnostic in &document.diagnostics {
            println!("  {}", render_diagnostic(diagnostic));
        }
    }
    println!();

    if report.ledger.is_empty() {
        println!("{} No data found", style("⚠").yellow());
        return;
    }

    println!(
        "{} {}",
        style("TOTAL:").bold(),
        style(format_amount(report.ledger.grand_total(), symbol)).bold()
    );

    let breakdown = report.ledger.category_breakdown();
    if !breakdown.is_empty() {
        println!();
        println!("{}", style("By category:").bold());
        for summary in &breakdown {
            println!(
                "  {}: {} ({}%) - {} transactions",
                summary.category,
                format_amount(summary.total_amount, symbol),
                summary.percentage,
                summary.count
            );
        }
    }

    if show_table {
        println!();
        println!(
            "{:<16} {:<32} {:>14} {:<24} {}",
            "Date", "Description", "Amount", "Category", "Source"
        );
        for t in report.ledger.iter() {
            println!(
                "{:<16} {:<32} {:>14} {:<24} {}",
                t.date_label,
                t.description,
                format_amount(t.amount, symbol),
                t.category,
                t.source
            );
        }
    }
}

fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let marker = match diagnostic.level {
        DiagnosticLevel::Info => style("ℹ").blue(),
        DiagnosticLevel::Success => style("✓").green(),
        DiagnosticLevel::Warning => style("⚠").yellow(),
        DiagnosticLevel::Error => style("✗").red(),
    };
    format!("{} {}", marker, diagnostic)
}
