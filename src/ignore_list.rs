use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::{SuppressionKind, SuppressionRecord};
use crate::scanner::read_lines;
use std::path::{Path, PathBuf};

/// Scan a project-level ignore list such as `.eslintignore`.
///
/// Every listed path becomes one record; a `#` comment on the line directly
/// above it is taken as the justification. A missing file yields no records.
pub fn scan_ignore_list(path: &Path, diagnostics: &dyn Diagnostics) -> Result<Vec<SuppressionRecord>> {
    if !path.exists() {
        diagnostics.debug(&format!("No ignore list found at {}", path.display()));
        return Ok(Vec::new());
    }

    let lines = read_lines(path)?;
    let records = ignore_list_records(&lines);

    diagnostics.debug(&format!(
        "Found {} ignored path(s) in {}",
        records.len(),
        path.display()
    ));

    Ok(records)
}

/// Build ignore-list records from already-loaded lines
pub fn ignore_list_records(lines: &[String]) -> Vec<SuppressionRecord> {
    let mut records = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let entry = raw.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        let line_number = index + 1;
        let mut record = SuppressionRecord::new(
            &PathBuf::from(entry),
            line_number,
            SuppressionKind::IgnoreList,
        );

        let reason = index
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .and_then(|previous| previous.trim().strip_prefix('#'))
            .map(str::trim)
            .filter(|text| !text.is_empty());
        if let Some(text) = reason {
            record.justification.push(text.to_string());
        }

        records.push(record);
    }

    records
}
