use crate::diagnostics::Diagnostics;
use crate::error::{Result, ScanError};
use crate::filters;
use crate::ignore_list::scan_ignore_list;
use crate::models::SuppressionRecord;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// How a dialect classified a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line carries a suppression directive; the record is fully populated
    Directive(SuppressionRecord),
    /// A comment line with its text, no directive
    Comment(String),
    /// Anything else, including blank lines
    Code,
}

/// A suppression-comment syntax the scanner understands
pub trait Dialect: Sync {
    /// Short name, also used for the CSV file name (`<name>-ignores.csv`)
    fn name(&self) -> &'static str;

    /// Whether comment lines following a directive extend its justification
    fn continues_justification(&self) -> bool;

    /// Classify the line at `index` (0-based) of `lines`
    fn classify(
        &self,
        path: &Path,
        lines: &[String],
        index: usize,
        diagnostics: &dyn Diagnostics,
    ) -> LineClass;
}

/// Scanner state carried from one line to the next.
///
/// At most one record is open; it is closed before a new one opens and
/// once more at end of input.
#[derive(Debug, Default)]
pub struct ScanState {
    open: Option<SuppressionRecord>,
    closed: Vec<SuppressionRecord>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record still accepting continuation lines, if any
    pub fn open_record(&self) -> Option<&SuppressionRecord> {
        self.open.as_ref()
    }

    /// Records already closed, in file order
    pub fn closed(&self) -> &[SuppressionRecord] {
        &self.closed
    }

    /// Advance the state by one classified line
    pub fn step(&mut self, line_number: usize, class: LineClass, continuation: bool) {
        match class {
            LineClass::Directive(record) => {
                self.close();
                self.open = Some(record);
            }
            LineClass::Comment(text) => {
                if !continuation {
                    return;
                }
                if let Some(record) = self.open.as_mut() {
                    record.line_end = line_number;
                    // A bare comment marker extends the span but adds no text
                    if !text.is_empty() {
                        record.justification.push(text);
                    }
                }
            }
            LineClass::Code => self.close(),
        }
    }

    /// Close any open record and return everything collected
    pub fn finish(mut self) -> Vec<SuppressionRecord> {
        self.close();
        self.closed
    }

    fn close(&mut self) {
        if let Some(record) = self.open.take() {
            self.closed.push(record);
        }
    }
}

/// Read a file into lines with trailing newlines stripped
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| ScanError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.lines().map(str::to_string).collect())
}

/// Run the scanner over already-loaded lines
pub fn scan_lines(
    path: &Path,
    lines: &[String],
    dialect: &dyn Dialect,
    diagnostics: &dyn Diagnostics,
) -> Vec<SuppressionRecord> {
    let continuation = dialect.continues_justification();

    let mut state = ScanState::new();
    for index in 0..lines.len() {
        let class = dialect.classify(path, lines, index, diagnostics);
        state.step(index + 1, class, continuation);
    }

    state.finish()
}

/// Read and scan a single file
pub fn scan_file(
    path: &Path,
    dialect: &dyn Dialect,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<SuppressionRecord>> {
    let lines = read_lines(path)?;
    Ok(scan_lines(path, &lines, dialect, diagnostics))
}

/// What to scan beyond the target itself
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Extensions to include when walking a directory (leading dot optional)
    pub extensions: Vec<String>,

    /// Directories to prune during traversal
    pub ignored_dirs: Vec<PathBuf>,

    /// Ignore-list file whose entries are prepended to the results
    pub ignore_list: Option<PathBuf>,
}

/// Aggregated records plus the number of source files scanned
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<SuppressionRecord>,
    pub files_scanned: usize,
}

/// Scan a file or directory tree and aggregate every record in walk order
pub fn scan_target(
    target: &Path,
    options: &ScanOptions,
    dialect: &dyn Dialect,
    diagnostics: &dyn Diagnostics,
) -> Result<ScanOutcome> {
    if !target.exists() {
        return Err(ScanError::TargetNotFound {
            path: target.to_path_buf(),
        });
    }

    let mut records = match options.ignore_list.as_deref() {
        Some(ignore_file) => scan_ignore_list(ignore_file, diagnostics)?,
        None => Vec::new(),
    };

    let files = if target.is_file() {
        vec![target.to_path_buf()]
    } else {
        collect_files(target, options)?
    };

    diagnostics.debug(&format!(
        "Scanning {} file(s) for {} suppressions",
        files.len(),
        dialect.name()
    ));

    // Indexed collect keeps walk order regardless of scheduling
    let per_file: Vec<Vec<SuppressionRecord>> = files
        .par_iter()
        .map(|path| scan_file(path, dialect, diagnostics))
        .collect::<Result<_>>()?;

    records.extend(per_file.into_iter().flatten());

    Ok(ScanOutcome {
        records,
        files_scanned: files.len(),
    })
}

/// Walk a directory and return matching files sorted by path
fn collect_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let mut walker = WalkBuilder::new(root);
    // Suppressions in git-ignored or hidden files still count
    walker.standard_filters(false);
    walker.sort_by_file_path(|a, b| a.cmp(b));

    let ignored_dirs = options.ignored_dirs.clone();
    walker.filter_entry(move |entry| {
        entry.depth() == 0 || !filters::is_excluded(entry.path(), &ignored_dirs)
    });

    let mut files = Vec::new();
    for result in walker.build() {
        let entry = result?;

        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }

        if filters::matches_extension(entry.path(), &options.extensions) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use crate::eslint::EslintDialect;
    use crate::models::SuppressionKind;
    use crate::pylint::PylintDialect;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn directive(line: usize) -> LineClass {
        LineClass::Directive(SuppressionRecord::new(
            Path::new("a.py"),
            line,
            SuppressionKind::PylintDisable,
        ))
    }

    #[test]
    fn test_state_opens_and_closes() {
        let mut state = ScanState::new();
        state.step(1, directive(1), true);
        assert_eq!(state.open_record().unwrap().line_start, 1);
        assert!(state.closed().is_empty());

        state.step(2, LineClass::Code, true);
        assert!(state.open_record().is_none());
        assert_eq!(state.closed().len(), 1);
    }

    #[test]
    fn test_state_new_directive_closes_previous() {
        let mut state = ScanState::new();
        state.step(1, directive(1), false);
        state.step(2, directive(2), false);
        assert_eq!(state.closed().len(), 1);
        assert_eq!(state.open_record().unwrap().line_start, 2);

        let records = state.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_end, 1);
        assert_eq!(records[1].line_end, 2);
    }

    #[test]
    fn test_state_comment_continuation() {
        let mut state = ScanState::new();
        state.step(3, directive(3), true);
        state.step(4, LineClass::Comment("one".to_string()), true);
        state.step(5, LineClass::Comment("two".to_string()), true);

        let open = state.open_record().unwrap();
        assert_eq!(open.line_end, 5);
        assert_eq!(open.justification, vec!["one", "two"]);
    }

    #[test]
    fn test_state_comment_without_continuation_keeps_record_open() {
        let mut state = ScanState::new();
        state.step(1, directive(1), false);
        state.step(2, LineClass::Comment("ignored".to_string()), false);

        let open = state.open_record().unwrap();
        assert_eq!(open.line_end, 1);
        assert!(open.justification.is_empty());
    }

    #[test]
    fn test_state_comment_without_open_record_is_noop() {
        let mut state = ScanState::new();
        state.step(1, LineClass::Comment("stray".to_string()), true);
        assert!(state.finish().is_empty());
    }

    #[test]
    fn test_state_finish_emits_open_record_once() {
        let mut state = ScanState::new();
        state.step(1, directive(1), true);
        state.step(2, LineClass::Code, true);
        state.step(3, directive(3), true);

        let records = state.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line_start, 3);
    }

    #[test]
    fn test_read_lines_strips_newlines() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.ts", "one\r\ntwo\nthree\n");

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_read_lines_rejects_binary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.ts");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_lines(&path).unwrap_err();
        assert!(matches!(err, ScanError::FileAccess { .. }));
    }

    #[test]
    fn test_scan_file_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "app.ts",
            "// reason\nconsole.log(1); // eslint-disable-line no-console\n",
        );

        let diagnostics = MemoryDiagnostics::new();
        let first = scan_file(&path, &EslintDialect, &diagnostics).unwrap();
        let second = scan_file(&path, &EslintDialect, &diagnostics).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scan_target_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = scan_target(
            &missing,
            &ScanOptions::default(),
            &PylintDialect,
            &MemoryDiagnostics::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::TargetNotFound { .. }));
    }

    #[test]
    fn test_scan_target_directory_order_and_filters() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "b.py", "x = 1  # pylint: disable=unused-variable\n");
        write_file(root, "a.py", "import os  # pylint: disable=unused-import\n");
        write_file(root, "notes.txt", "# pylint: disable=ignored-file-type\n");
        write_file(root, "venv/lib.py", "y = 2  # pylint: disable=excluded\n");
        write_file(root, "pkg/c.py", "z = 3  # pylint: disable=invalid-name\n");

        let options = ScanOptions {
            extensions: vec!["py".to_string()],
            ignored_dirs: vec![PathBuf::from("venv")],
            ignore_list: None,
        };

        let outcome =
            scan_target(root, &options, &PylintDialect, &MemoryDiagnostics::new()).unwrap();

        assert_eq!(outcome.files_scanned, 3);
        let rules: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r.rule.clone().unwrap())
            .collect();
        assert_eq!(rules, vec!["unused-import", "unused-variable", "invalid-name"]);
    }

    #[test]
    fn test_scan_target_prepends_ignore_list() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let source = write_file(root, "src/app.js", "/* eslint-disable */\n");
        let ignore_file = write_file(root, ".eslintignore", "# generated\ndist/\n");

        let options = ScanOptions {
            extensions: vec![".js".to_string()],
            ignored_dirs: Vec::new(),
            ignore_list: Some(ignore_file),
        };

        let outcome =
            scan_target(&source, &options, &EslintDialect, &MemoryDiagnostics::new()).unwrap();

        assert_eq!(outcome.files_scanned, 1);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].kind, SuppressionKind::IgnoreList);
        assert_eq!(outcome.records[0].location, PathBuf::from("dist/"));
        assert_eq!(outcome.records[1].kind, SuppressionKind::EslintFile);
    }

    #[test]
    fn test_scan_target_aborts_on_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "good.py", "# pylint: disable=foo\n");
        fs::write(root.join("bad.py"), [0xc3, 0x28]).unwrap();

        let options = ScanOptions {
            extensions: vec!["py".to_string()],
            ..ScanOptions::default()
        };

        let err = scan_target(root, &options, &PylintDialect, &MemoryDiagnostics::new())
            .unwrap_err();
        assert!(matches!(err, ScanError::FileAccess { .. }));
    }
}
