//! Quell - Audit your linter suppressions
//!
//! A CLI tool that finds linter-suppression directives in a codebase and
//! reports where each one is, which rule it silences, and the comment that
//! justifies it.
//!
//! # Features
//!
//! - ESLint directives (`/* eslint-disable */`, `// eslint-disable-next-line`)
//!   and TypeScript `// @ts-ignore` style comments
//! - Entries in a project `.eslintignore`
//! - Pylint `# pylint: disable=...` directives, including multi-line reasons
//! - Console, table, JSON and CSV reports
//! - A verification mode that fails when any suppression has no reason
//!
//! # Example
//!
//! ```rust,no_run
//! use quell::*;
//! use std::path::Path;
//!
//! let options = scanner::ScanOptions {
//!     extensions: vec!["py".to_string()],
//!     ..Default::default()
//! };
//!
//! // Scan directory
//! let outcome = scanner::scan_target(
//!     Path::new("."),
//!     &options,
//!     &PylintDialect,
//!     &TracingDiagnostics,
//! ).unwrap();
//!
//! // Fail on suppressions without a reason
//! policy::verify(&outcome.records, &TracingDiagnostics).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod eslint;
pub mod filters;
pub mod ignore_list;
pub mod models;
pub mod policy;
pub mod pylint;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use error::ScanError;
pub use eslint::EslintDialect;
pub use models::{Config, SuppressionKind, SuppressionRecord, SuppressionReport};
pub use pylint::PylintDialect;
pub use scanner::Dialect;
