use crate::filters::parse_list;
use crate::models::Config;
use crate::pylint::PylintDialect;
use crate::scanner::ScanOptions;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quell")]
#[command(version, about = "Audit linter suppressions and their justifications", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Scan JavaScript/TypeScript sources for eslint-disable and @ts- directives
    Eslint(EslintArgs),
    /// Scan Python sources for pylint: disable directives
    Pylint(PylintArgs),
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Eslint(args) => &args.common,
            Commands::Pylint(args) => &args.common,
        }
    }
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// File or directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Directory to save a CSV report in (if not specified, prints to stdout)
    #[arg(short = 'O', long)]
    pub output_dir: Option<PathBuf>,

    /// Comma-separated directories to skip
    #[arg(short = 'I', long)]
    pub ignore_dirs: Option<String>,

    /// Only verify that every suppression has a reason; exit 1 otherwise
    #[arg(short, long)]
    pub verify: bool,

    /// Console output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct EslintArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the .eslintignore file to audit, if it exists
    #[arg(short = 'E', long)]
    pub eslint_ignore_path: Option<PathBuf>,

    /// Comma-separated file extensions to scan (e.g. ".js,.ts")
    #[arg(short = 'F', long)]
    pub file_ext: Option<String>,
}

impl EslintArgs {
    /// Resolve scan options, letting flags override the config file
    pub fn scan_options(&self, config: &Config) -> ScanOptions {
        let extensions = match &self.file_ext {
            Some(list) => parse_list(list),
            None => config.eslint.extensions.clone(),
        };

        ScanOptions {
            extensions,
            ignored_dirs: resolve_ignored_dirs(&self.common, &config.eslint.ignored_dirs),
            ignore_list: Some(
                self.eslint_ignore_path
                    .clone()
                    .unwrap_or_else(|| config.eslint.ignore_file.clone()),
            ),
        }
    }
}

#[derive(Parser, Debug)]
pub struct PylintArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl PylintArgs {
    pub fn scan_options(&self, config: &Config) -> ScanOptions {
        ScanOptions {
            extensions: vec![PylintDialect::EXTENSION.to_string()],
            ignored_dirs: resolve_ignored_dirs(&self.common, &config.pylint.ignored_dirs),
            ignore_list: None,
        }
    }
}

fn resolve_ignored_dirs(common: &CommonArgs, configured: &[String]) -> Vec<PathBuf> {
    let dirs = match &common.ignore_dirs {
        Some(list) => parse_list(list),
        None => configured.to_vec(),
    };
    dirs.into_iter().map(PathBuf::from).collect()
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One labeled block per suppression
    Terminal,
    /// Summary and suppression tables
    Table,
    /// JSON format
    Json,
}
