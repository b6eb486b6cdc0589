//! Summary types for a fixer run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::label::CleanReport;

/// Summary of one fixer run.
#[derive(Clone, Debug, Serialize)]
pub struct FixReport {
    /// The folder that was processed.
    pub folder: PathBuf,
    /// One entry per rewritten file, in processing order.
    pub files: Vec<FixedFile>,
    /// Files that could not be read and were left untouched.
    pub unreadable: Vec<UnreadableFile>,
    /// Kept and dropped tokens across all files.
    pub labels: CleanReport,
}

impl FixReport {
    pub fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            files: Vec::new(),
            unreadable: Vec::new(),
            labels: CleanReport::new(),
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    /// Names of files left with no labels after fixing.
    pub fn emptied_files(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|file| file.labels_kept == 0)
            .map(|file| file.file_name.as_str())
            .collect()
    }
}

impl fmt::Display for FixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files.is_empty() && self.unreadable.is_empty() {
            return writeln!(f, "No label files found in '{}'", self.folder.display());
        }

        writeln!(
            f,
            "Fixed {} label file(s) in '{}':",
            self.files.len(),
            self.folder.display()
        )?;
        write!(f, "{}", self.labels)?;

        let emptied = self.emptied_files();
        if !emptied.is_empty() {
            writeln!(f)?;
            writeln!(f, "Empty after fixing ({}):", emptied.len())?;
            for name in emptied {
                writeln!(f, "  - {}", name)?;
            }
        }

        if !self.unreadable.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unreadable, left untouched ({}):", self.unreadable.len())?;
            for file in &self.unreadable {
                writeln!(f, "  - {} ({})", file.file_name, file.reason)?;
            }
        }

        Ok(())
    }
}

/// What happened to a single label file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FixedFile {
    pub file_name: String,
    pub labels_kept: usize,
    pub labels_dropped: usize,
}

/// A label file that could not be read.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnreadableFile {
    pub file_name: String,
    pub reason: String,
}
