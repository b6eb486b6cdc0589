use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelfix operations.
///
/// Every variant is fatal to the invocation. Corrupt label tokens are not
/// errors at this level; they are recorded in a [`CleanReport`] instead.
///
/// [`CleanReport`]: crate::label::CleanReport
#[derive(Debug, Error)]
pub enum LabelfixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Folder '{}' does not exist", .path.display())]
    FolderNotFound { path: PathBuf },

    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Input file '{}' does not exist", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed while traversing directory {}: {source}", .path.display())]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read label file {}: {source}", .path.display())]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {}: {source}", .path.display())]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),

    /// Rendered clap usage error, printed verbatim by the binaries.
    #[error("{0}")]
    Usage(String),
}
