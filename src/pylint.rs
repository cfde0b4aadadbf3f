//! Pylint suppression comments (`# pylint: disable=...`).
//!
//! Justification is gathered from the comment line above the directive, the
//! free text after the rule list, and every comment line that directly
//! follows the directive.

use crate::diagnostics::Diagnostics;
use crate::models::{SuppressionKind, SuppressionRecord};
use crate::scanner::{Dialect, LineClass};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*#\s*pylint\s*:\s*disable(?:-next)?\s*=\s*(?P<rule>[\w\-]+(?:\s*,\s*[\w\-]+)*)?,?(?:\s+(?P<reason>.+?))?\s*$",
    )
    .expect("pylint directive regex should compile")
});

/// Dialect for `#` comment languages checked by Pylint
#[derive(Debug, Default, Clone, Copy)]
pub struct PylintDialect;

impl PylintDialect {
    /// The only extension scanned when walking a directory
    pub const EXTENSION: &'static str = "py";
}

/// Text of a `#` comment line, or `None` for code
fn comment_body(line: &str) -> Option<&str> {
    line.trim().strip_prefix('#').map(str::trim)
}

/// Same-line reason with a leading `#` or `--` marker removed
fn clean_reason(reason: &str) -> &str {
    let reason = reason.trim();
    reason
        .strip_prefix("--")
        .or_else(|| reason.strip_prefix('#'))
        .unwrap_or(reason)
        .trim()
}

impl Dialect for PylintDialect {
    fn name(&self) -> &'static str {
        "pylint"
    }

    fn continues_justification(&self) -> bool {
        true
    }

    fn classify(
        &self,
        path: &Path,
        lines: &[String],
        index: usize,
        diagnostics: &dyn Diagnostics,
    ) -> LineClass {
        let Some(line) = lines.get(index).map(|line| line.trim()) else {
            return LineClass::Code;
        };
        let line_number = index + 1;

        let Some(caps) = DIRECTIVE.captures(line) else {
            return match comment_body(line) {
                Some(text) => LineClass::Comment(text.to_string()),
                None => LineClass::Code,
            };
        };

        let mut record = SuppressionRecord::new(path, line_number, SuppressionKind::PylintDisable);

        record.rule = match caps.name("rule") {
            Some(rule) => Some(rule.as_str().trim())
                .filter(|rule| !rule.is_empty())
                .map(str::to_string),
            None => {
                diagnostics.debug(&format!(
                    "Unable to retrieve rule matching group at {}:{}",
                    path.display(),
                    line_number
                ));
                None
            }
        };

        let preceding = index
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .and_then(|previous| comment_body(previous))
            .filter(|text| !text.is_empty());
        if let Some(text) = preceding {
            record.justification.push(text.to_string());
        }

        if let Some(reason) = caps
            .name("reason")
            .map(|m| clean_reason(m.as_str()))
            .filter(|reason| !reason.is_empty())
        {
            record.justification.push(reason.to_string());
        }

        LineClass::Directive(record)
    }
}
