use anyhow::{Context, Result};
use clap::Parser;
use quell::diagnostics::{Diagnostics, TracingDiagnostics};
use quell::reporter::ReportLayout;
use quell::scanner::{Dialect, ScanOptions};
use quell::{cli, config, models, policy, reporter, scanner, EslintDialect, PylintDialect};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.command.common().verbose);

    let config = config::load_config(cli.command.common().config.as_deref())
        .context("Failed to load configuration")?;

    match &cli.command {
        cli::Commands::Eslint(args) => scan_command(
            &args.common,
            args.scan_options(&config),
            &EslintDialect,
            ReportLayout::Eslint,
        )?,
        cli::Commands::Pylint(args) => scan_command(
            &args.common,
            args.scan_options(&config),
            &PylintDialect,
            ReportLayout::Pylint,
        )?,
    }

    Ok(())
}

/// Logs go to stderr so reports on stdout stay clean
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("QUELL_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn scan_command(
    args: &cli::CommonArgs,
    options: ScanOptions,
    dialect: &dyn Dialect,
    layout: ReportLayout,
) -> Result<()> {
    let diagnostics = TracingDiagnostics;

    match args.output_dir.as_deref() {
        Some(dir) => reporter::prepare_output_dir(dir)?,
        None if !args.verify => diagnostics
            .warn("No output directory was specified, issues will be printed in the console."),
        None => {}
    }

    diagnostics.debug(&format!("Scanning: {}", args.path.display()));

    let outcome = scanner::scan_target(&args.path, &options, dialect, &diagnostics)?;

    if outcome.records.is_empty() {
        diagnostics.info("No ignores detected.");
        return Ok(());
    }

    let report = models::SuppressionReport::new(
        outcome.records,
        outcome.files_scanned,
        args.path.clone(),
    );
    diagnostics.warn(&reporter::summary_message(&report));

    if args.verify {
        policy::verify(&report.records, &diagnostics)?;
        return Ok(());
    }

    reporter::generate_report(&report, layout, args.format, args.output_dir.as_deref())
        .context("Failed to generate report")?;

    Ok(())
}
