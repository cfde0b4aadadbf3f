use std::path::{Component, Path, PathBuf};

/// Split a comma-separated CLI list into trimmed, non-empty entries
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check whether a file's extension is in `extensions` (leading dot optional)
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };

    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.') == ext)
}

/// Check whether a walked path falls under one of the excluded directories.
///
/// Matches when the path starts with the exclusion (ignoring a leading `./`),
/// or, for single-component exclusions like `node_modules`, when any
/// component of the path has that name.
pub fn is_excluded(path: &Path, ignored_dirs: &[PathBuf]) -> bool {
    let path = strip_current_dir(path);

    ignored_dirs.iter().any(|ignored| {
        let ignored = strip_current_dir(ignored);
        if ignored.as_os_str().is_empty() {
            return false;
        }

        if path.starts_with(ignored) {
            return true;
        }

        let mut components = ignored.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => path
                .components()
                .any(|c| matches!(c, Component::Normal(part) if part == name)),
            _ => false,
        }
    })
}

fn strip_current_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}
