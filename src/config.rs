use crate::models::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from file or use defaults
///
/// Search order:
/// 1. Custom path if provided via --config
/// 2. .quellrc in current directory
/// 3. ~/.quellrc in home directory
/// 4. Built-in defaults
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    // If custom path provided, use it exclusively
    if let Some(path) = custom_path {
        return load_config_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let candidates = [Some(PathBuf::from(".quellrc")), get_home_config_path()];
    for path in candidates.into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        match load_config_from_file(&path) {
            Ok(config) => {
                tracing::debug!("Using config from {}", path.display());
                return Ok(config);
            }
            Err(err) => tracing::warn!("Skipping config {}: {:#}", path.display(), err),
        }
    }

    Ok(Config::default())
}

/// Load config from a specific file
fn load_config_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Get path to home directory config file
fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quellrc"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_custom_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[eslint]
extensions = [".ts", ".vue"]
ignore_file = "config/.eslintignore"

[pylint]
ignored_dirs = [".venv", "migrations"]
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.eslint.extensions, vec![".ts", ".vue"]);
        assert_eq!(config.eslint.ignore_file, PathBuf::from("config/.eslintignore"));
        // Unset keys keep their defaults
        assert_eq!(config.eslint.ignored_dirs, vec!["node_modules"]);
        assert_eq!(config.pylint.ignored_dirs, vec![".venv", "migrations"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = load_config_from_file(temp_file.path()).unwrap();
        assert_eq!(config.eslint.extensions.len(), 5);
        assert!(config.pylint.ignored_dirs.is_empty());
    }

    #[test]
    fn test_invalid_custom_config_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[eslint]\nextensions = 3\n").unwrap();

        assert!(load_config(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_missing_custom_config_fails() {
        assert!(load_config(Some(Path::new("/definitely/not/here/.quellrc"))).is_err());
    }
}
