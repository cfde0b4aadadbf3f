use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder rendered when a suppression carries no justification
pub const NO_REASON: &str = "(No reason provided)";

/// Placeholder rendered when a suppression covers every rule
pub const NO_RULE: &str = "NA";

/// The kind of suppression a record was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionKind {
    /// A path listed in a project-level `.eslintignore`
    IgnoreList,
    /// `/* eslint-disable */` block covering the whole file
    EslintFile,
    /// `// eslint-disable-line` or `// eslint-disable-next-line`
    EslintLine,
    /// `// @ts-ignore`, `// @ts-expect-error` and friends
    TsComment,
    /// `# pylint: disable=...`
    PylintDisable,
}

impl SuppressionKind {
    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            SuppressionKind::IgnoreList => "ignore from .eslintignore",
            SuppressionKind::EslintFile => "eslint-ignore (entire file)",
            SuppressionKind::EslintLine => "eslint-ignore (single line)",
            SuppressionKind::TsComment => "ts-ignore (single line)",
            SuppressionKind::PylintDisable => "pylint-disable",
        }
    }
}

impl fmt::Display for SuppressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single suppression directive found while scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRecord {
    /// File containing the directive, or the ignored path for ignore-list entries
    pub location: PathBuf,

    /// First line covered by the suppression (1-indexed)
    pub line_start: usize,

    /// Last line covered, including justification continuation lines
    pub line_end: usize,

    /// Rule list being suppressed; `None` means every rule
    pub rule: Option<String>,

    /// Justification fragments in discovery order
    pub justification: Vec<String>,

    /// Directive shape the record was produced from
    pub kind: SuppressionKind,
}

impl SuppressionRecord {
    /// Create a single-line record with no justification
    pub fn new(location: &Path, line_number: usize, kind: SuppressionKind) -> Self {
        Self {
            location: location.to_path_buf(),
            line_start: line_number,
            line_end: line_number,
            rule: None,
            justification: Vec::new(),
            kind,
        }
    }

    pub fn is_justified(&self) -> bool {
        !self.justification.is_empty()
    }

    pub fn is_ignore_list(&self) -> bool {
        self.kind == SuppressionKind::IgnoreList
    }

    /// Line span formatted as `start-end`
    pub fn line_section(&self) -> String {
        format!("{}-{}", self.line_start, self.line_end)
    }

    /// Suppressed rule, or `NA` when every rule is suppressed
    pub fn rule_display(&self) -> &str {
        self.rule.as_deref().unwrap_or(NO_RULE)
    }

    /// Justification fragments joined by a space, or the no-reason placeholder
    pub fn reason_display(&self) -> String {
        if self.justification.is_empty() {
            NO_REASON.to_string()
        } else {
            self.justification.join(" ")
        }
    }
}

/// Aggregated result of a scan, used by the table and JSON renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionReport {
    /// All records in aggregate order
    pub records: Vec<SuppressionRecord>,

    /// Total number of records
    pub total_count: usize,

    /// Records found in scanned files (ignore-list entries excluded)
    pub discovered_count: usize,

    /// Records without any justification
    pub unjustified_count: usize,

    /// Count of records by kind label
    pub by_kind: HashMap<String, usize>,

    /// Number of source files scanned
    pub files_scanned: usize,

    /// Path that was scanned
    pub scan_path: PathBuf,

    /// When the scan was performed
    pub scan_time: DateTime<Utc>,
}

impl SuppressionReport {
    /// Create a new report from the aggregated records
    pub fn new(records: Vec<SuppressionRecord>, files_scanned: usize, scan_path: PathBuf) -> Self {
        let mut by_kind: HashMap<String, usize> = HashMap::new();
        for record in &records {
            *by_kind.entry(record.kind.label().to_string()).or_insert(0) += 1;
        }

        Self {
            total_count: records.len(),
            discovered_count: records.iter().filter(|r| !r.is_ignore_list()).count(),
            unjustified_count: records.iter().filter(|r| !r.is_justified()).count(),
            by_kind,
            records,
            files_scanned,
            scan_path,
            scan_time: Utc::now(),
        }
    }
}

/// Configuration loaded from `.quellrc`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub eslint: EslintConfig,

    #[serde(default)]
    pub pylint: PylintConfig,
}

/// Settings for the ESLint/TypeScript scan
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EslintConfig {
    /// File extensions to scan
    #[serde(default = "default_eslint_extensions")]
    pub extensions: Vec<String>,

    /// Directories to skip during traversal
    #[serde(default = "default_eslint_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// Project-level ignore list to audit
    #[serde(default = "default_eslint_ignore_file")]
    pub ignore_file: PathBuf,
}

impl Default for EslintConfig {
    fn default() -> Self {
        Self {
            extensions: default_eslint_extensions(),
            ignored_dirs: default_eslint_ignored_dirs(),
            ignore_file: default_eslint_ignore_file(),
        }
    }
}

/// Settings for the Pylint scan
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PylintConfig {
    /// Directories to skip during traversal
    #[serde(default)]
    pub ignored_dirs: Vec<String>,
}

fn default_eslint_extensions() -> Vec<String> {
    vec![
        ".mjs".to_string(),
        ".js".to_string(),
        ".ts".to_string(),
        ".jsx".to_string(),
        ".tsx".to_string(),
    ]
}

fn default_eslint_ignored_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_eslint_ignore_file() -> PathBuf {
    PathBuf::from(".eslintignore")
}
