//! Per-run record of kept and corrupt label tokens.

use std::fmt;

use serde::Serialize;

use super::TokenError;

/// Counts of kept tokens and the list of corrupt ones, in discovery order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CleanReport {
    /// Number of valid tokens written to output.
    pub kept: usize,
    /// Every corrupt token that was dropped.
    pub issues: Vec<CorruptLabel>,
}

impl CleanReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_kept(&mut self, count: usize) {
        self.kept += count;
    }

    pub fn add_corrupt(&mut self, issue: CorruptLabel) {
        self.issues.push(issue);
    }

    pub fn kept_count(&self) -> usize {
        self.kept
    }

    pub fn dropped_count(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if no token was dropped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} label(s) kept, {} corrupt label(s) dropped",
            self.kept,
            self.issues.len()
        )?;

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Dropped ({}):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - {}", issue)?;
            }
        }

        Ok(())
    }
}

/// A label token that failed validation and was left out of the output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorruptLabel {
    /// Label file name (fixer) or image file name (splitter).
    pub source: String,
    /// 1-based line number in the file that was read.
    pub line: usize,
    /// The raw token as it appeared in the input.
    pub token: String,
    pub reason: TokenError,
}

impl fmt::Display for CorruptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' line {}: {} ({})",
            self.source, self.line, self.token, self.reason
        )
    }
}
