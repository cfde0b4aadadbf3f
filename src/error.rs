use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Specified path '{}' does not exist", path.display())]
    TargetNotFound { path: PathBuf },

    #[error("Failed to read file: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} suppression(s) found without a justification")]
    Unjustified { count: usize },

    #[error("Failed to create output directory: {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
