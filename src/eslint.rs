//! ESLint and TypeScript suppression comments.
//!
//! Recognizes three directive shapes, tried in order on each trimmed line:
//!
//! 1. `/* eslint-disable [rules] [-- reason] */` covering the whole file
//! 2. `// eslint-disable-line ...` or `// eslint-disable-next-line ...`
//! 3. `// @ts-ignore`, `// @ts-expect-error`, `// @ts-nocheck`
//!
//! A directive's justification is the comment on the line directly above it,
//! followed by any `-- reason` text on the directive line itself.

use crate::diagnostics::Diagnostics;
use crate::models::{SuppressionKind, SuppressionRecord};
use crate::scanner::{Dialect, LineClass};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static FILE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^/\*\s*eslint-disable(?P<rule>\s[\w@\-,\s/]*?)?\s*(?:--\s*(?P<reason>.*?))?\s*\*/$",
    )
    .expect("file directive regex should compile")
});

static LINE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*(?://|/\*)\s*eslint-disable(?:-next)?-line(?P<rule>\s[\w@\-,\s/]*?)?\s*(?:--\s*(?P<reason>.*?))?\s*(?:\*/)?$",
    )
    .expect("line directive regex should compile")
});

static TS_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//\s*@ts-[a-z\-]*(?:\s*(?::|--)?\s*(?P<reason>.*?))?\s*$")
        .expect("ts directive regex should compile")
});

/// Dialect for `//` and `/* */` comment languages
#[derive(Debug, Default, Clone, Copy)]
pub struct EslintDialect;

/// Match `line` against the directive shapes in precedence order
fn match_directive(line: &str) -> Option<(SuppressionKind, Captures<'_>)> {
    [
        (&*FILE_DIRECTIVE, SuppressionKind::EslintFile),
        (&*LINE_DIRECTIVE, SuppressionKind::EslintLine),
        (&*TS_DIRECTIVE, SuppressionKind::TsComment),
    ]
    .into_iter()
    .find_map(|(pattern, kind)| pattern.captures(line).map(|caps| (kind, caps)))
}

/// Body of the comment on `lines[index]` with markers removed, or `None` for code
fn comment_body(lines: &[String], index: usize) -> Option<&str> {
    let line = lines.get(index)?.trim();

    let body = if let Some(rest) = line.strip_prefix("//") {
        rest
    } else if let Some(rest) = line.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else if line.starts_with("*/") {
        ""
    } else if line.starts_with('*') && inside_block_comment(lines, index) {
        let rest = &line[1..];
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        return None;
    };

    Some(body.trim().trim_matches('*').trim())
}

/// Whether a block comment opened above `index` is still unterminated.
///
/// Keeps `* quantity` style operator continuations from reading as comments.
fn inside_block_comment(lines: &[String], index: usize) -> bool {
    for line in lines[..index.min(lines.len())].iter().rev() {
        match (line.rfind("/*"), line.rfind("*/")) {
            (Some(open), Some(close)) => return open > close,
            (Some(_), None) => return true,
            (None, Some(_)) => return false,
            (None, None) => {}
        }
    }

    false
}

/// Justification text carried by the line above a directive
fn preceding_justification(lines: &[String], index: usize) -> Option<String> {
    comment_body(lines, index.checked_sub(1)?)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl Dialect for EslintDialect {
    fn name(&self) -> &'static str {
        "eslint"
    }

    fn continues_justification(&self) -> bool {
        false
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

        let Some((kind, caps)) = match_directive(line) else {
            return match comment_body(lines, index) {
                Some(text) => LineClass::Comment(text.to_string()),
                None => LineClass::Code,
            };
        };

        let mut record = SuppressionRecord::new(path, line_number, kind);

        record.rule = match caps.name("rule") {
            Some(rule) => Some(rule.as_str().trim())
                .filter(|rule| !rule.is_empty())
                .map(str::to_string),
            None => {
                diagnostics.debug(&format!(
                    "Unable to retrieve rule matching group for {} at {}:{}",
                    kind,
                    path.display(),
                    line_number
                ));
                None
            }
        };

        if let Some(text) = preceding_justification(lines, index) {
            record.justification.push(text);
        }

        if let Some(reason) = caps
            .name("reason")
            .map(|m| m.as_str().trim())
            .filter(|reason| !reason.is_empty())
        {
            record.justification.push(reason.to_string());
        }

        LineClass::Directive(record)
    }
}
