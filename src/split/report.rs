//! Summary types for a splitter run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::label::CleanReport;

/// Summary of one splitter run.
#[derive(Clone, Debug, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Non-blank aggregate lines.
    pub records: usize,
    /// Distinct label files on disk after the run.
    pub files_written: usize,
    /// Label files left empty because no token survived.
    pub empty_files: usize,
    /// Records whose label file had already been written by an earlier record.
    pub collisions: usize,
    pub skipped: Vec<SkippedRecord>,
    pub labels: CleanReport,
}

impl SplitReport {
    pub fn new(input: &Path, output_dir: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            records: 0,
            files_written: 0,
            empty_files: 0,
            collisions: 0,
            skipped: Vec::new(),
            labels: CleanReport::new(),
        }
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Split {} record(s) from '{}' into '{}':",
            self.records,
            self.input.display(),
            self.output_dir.display()
        )?;
        writeln!(
            f,
            "  {} label file(s) written, {} empty",
            self.files_written, self.empty_files
        )?;
        if self.collisions > 0 {
            writeln!(
                f,
                "  {} record(s) overwrote an earlier record's label file",
                self.collisions
            )?;
        }
        write!(f, "{}", self.labels)?;

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped records ({}):", self.skipped.len())?;
            for record in &self.skipped {
                writeln!(f, "  - line {}: '{}' ({})", record.line, record.image, record.reason)?;
            }
        }

        Ok(())
    }
}

/// An aggregate record that produced no label file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub line: usize,
    pub image: String,
    pub reason: String,
}
