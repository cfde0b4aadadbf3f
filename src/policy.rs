use crate::diagnostics::Diagnostics;
use crate::error::{Result, ScanError};
use crate::models::SuppressionRecord;

/// Fail when any suppression lacks a justification.
///
/// Each offending record is reported as `<n>. <location>, lines <start>-<end>`
/// through `diagnostics`. Ignore-list entries are checked like any other record.
pub fn verify(records: &[SuppressionRecord], diagnostics: &dyn Diagnostics) -> Result<()> {
    let unjustified: Vec<&SuppressionRecord> =
        records.iter().filter(|record| !record.is_justified()).collect();

    if unjustified.is_empty() {
        return Ok(());
    }

    diagnostics.error(
        "The following ignores were detected without any reasons for justification. \
         Please ensure that a reason is given either in the same comment line, \
         or in comments immediately around the original ignore.",
    );

    for (idx, record) in unjustified.iter().enumerate() {
        diagnostics.error(&format!(
            "{}. {}, lines {}",
            idx + 1,
            record.location.display(),
            record.line_section()
        ));
    }

    Err(ScanError::Unjustified {
        count: unjustified.len(),
    })
}
