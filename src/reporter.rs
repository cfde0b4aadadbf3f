use crate::cli::OutputFormat;
use crate::error::ScanError;
use crate::models::{SuppressionRecord, SuppressionReport};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fs;
use std::path::{Path, PathBuf};

/// Column layout and labels, one per dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    Eslint,
    Pylint,
}

impl ReportLayout {
    /// CSV file name written into the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportLayout::Eslint => "eslint-ignores.csv",
            ReportLayout::Pylint => "pylint-ignores.csv",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportLayout::Eslint => &["File", "Line section", "Type", "Rule", "Reason"],
            ReportLayout::Pylint => &["File", "Line section", "Pylint issue", "Reason"],
        }
    }

    /// Field values for one record, in header order
    pub fn row(&self, record: &SuppressionRecord) -> Vec<String> {
        let file = record.location.display().to_string();
        match self {
            ReportLayout::Eslint => vec![
                file,
                record.line_section(),
                record.kind.label().to_string(),
                record.rule_display().to_string(),
                record.reason_display(),
            ],
            ReportLayout::Pylint => vec![
                file,
                record.line_section(),
                record.rule_display().to_string(),
                record.reason_display(),
            ],
        }
    }
}

/// Warning shown after a scan that found suppressions
pub fn summary_message(report: &SuppressionReport) -> String {
    let count = report.discovered_count;
    let files = report.files_scanned;
    format!(
        "{} instance{} of ignores were detected across {} file{}, please assess if they are still relevant.",
        count,
        if count == 1 { "" } else { "s" },
        files,
        if files == 1 { "" } else { "s" }
    )
}

/// Create the report directory if it does not exist yet
pub fn prepare_output_dir(dir: &Path) -> crate::error::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    tracing::info!("Creating export directory: {}", dir.display());
    fs::create_dir_all(dir).map_err(|source| ScanError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the report as CSV into `output_dir`, or print it in `format`
pub fn generate_report(
    report: &SuppressionReport,
    layout: ReportLayout,
    format: OutputFormat,
    output_dir: Option<&Path>,
) -> Result<()> {
    if let Some(dir) = output_dir {
        let path = write_csv(report, layout, dir)?;
        println!("Report written to {}", path.display());
        return Ok(());
    }

    let output = match format {
        OutputFormat::Terminal => format_terminal(report, layout),
        OutputFormat::Table => format_table(report, layout),
        OutputFormat::Json => format_json(report)?,
    };
    print!("{}", output);

    Ok(())
}

/// Write `<dialect>-ignores.csv` and return its path
pub fn write_csv(report: &SuppressionReport, layout: ReportLayout, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(layout.file_name());
    fs::write(&path, format_csv(report, layout))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(path)
}

/// Format records as labeled blocks separated by blank lines
fn format_terminal(report: &SuppressionReport, layout: ReportLayout) -> String {
    let mut output = String::new();

    for record in &report.records {
        match layout {
            ReportLayout::Eslint => {
                output.push_str(&format!("File: {}\n", record.location.display()));
                output.push_str(&format!("Lines: {}\n", record.line_section()));
                output.push_str(&format!("Type: {}\n", record.kind));
                output.push_str(&format!("Rule: {}\n", record.rule_display()));
            }
            ReportLayout::Pylint => {
                output.push_str(&format!(
                    "File: {}, lines {}\n",
                    record.location.display(),
                    record.line_section()
                ));
                output.push_str(&format!("Pylint issue: {}\n", record.rule_display()));
            }
        }
        output.push_str(&format!("Reason: {}\n\n", record.reason_display()));
    }

    output
}

/// Format report as summary and record tables
fn format_table(report: &SuppressionReport, layout: ReportLayout) -> String {
    let mut output = String::new();

    output.push_str(&format!("Scanned: {}\n", report.scan_path.display()));
    output.push_str(&format!(
        "Suppressions: {} ({} without a reason)\n\n",
        report.total_count, report.unjustified_count
    ));

    if !report.by_kind.is_empty() {
        let mut kind_table = Table::new();
        kind_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Type").fg(Color::Cyan),
                Cell::new("Count").fg(Color::Cyan),
            ]);

        let mut kinds: Vec<_> = report.by_kind.iter().collect();
        kinds.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (kind, count) in kinds {
            kind_table.add_row(vec![kind.as_str(), &count.to_string()]);
        }

        output.push_str(&format!("{}\n\n", kind_table));
    }

    let mut record_table = Table::new();
    record_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            layout
                .headers()
                .iter()
                .map(|header| Cell::new(header).fg(Color::Cyan)),
        );

    for record in &report.records {
        let mut row: Vec<Cell> = layout.row(record).into_iter().map(Cell::new).collect();
        if !record.is_justified() {
            if let Some(reason) = row.pop() {
                row.push(reason.fg(Color::Red));
            }
        }
        record_table.add_row(row);
    }

    output.push_str(&format!("{}\n", record_table));
    output
}

/// Format report as JSON
fn format_json(report: &SuppressionReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
    json.push('\n');
    Ok(json)
}

/// Format records as CSV with CRLF row terminators
fn format_csv(report: &SuppressionReport, layout: ReportLayout) -> String {
    let mut output = String::new();

    push_csv_row(&mut output, layout.headers().iter().copied());
    for record in &report.records {
        let row = layout.row(record);
        push_csv_row(&mut output, row.iter().map(String::as_str));
    }

    output
}

fn push_csv_row<'a>(output: &mut String, fields: impl Iterator<Item = &'a str>) {
    let escaped: Vec<String> = fields.map(escape_csv_field).collect();
    output.push_str(&escaped.join(","));
    output.push_str("\r\n");
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
