//! Label Fixer: repairs every `.txt` label file in a folder in place.
//!
//! Each file is read, every line is cleaned with the shared token rule, and
//! the file is overwritten with the surviving tokens, one per line. There is
//! no backup.

mod report;

pub use report::{FixReport, FixedFile, UnreadableFile};

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::LabelfixError;
use crate::label::{clean_label_line, render_label_file, CleanReport};
use crate::progress::create_progress_bar;

/// File name suffix of label files. Matched case-sensitively.
pub const LABEL_SUFFIX: &str = ".txt";

/// Options for the fixer.
#[derive(Clone, Debug, Default)]
pub struct FixOptions {
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

/// Fix all label files directly inside `folder`.
///
/// A missing folder is an error and nothing is touched. A folder without any
/// `.txt` file yields an empty report. Files that cannot be read as UTF-8
/// text are skipped with a warning and listed in [`FixReport::unreadable`].
pub fn fix_labels_in_folder(folder: &Path, opts: &FixOptions) -> Result<FixReport, LabelfixError> {
    if !folder.exists() {
        return Err(LabelfixError::FolderNotFound {
            path: folder.to_path_buf(),
        });
    }
    if !folder.is_dir() {
        return Err(LabelfixError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let label_files = collect_label_files(folder)?;
    let mut report = FixReport::new(folder);

    if label_files.is_empty() {
        info!("No .txt files found in '{}'.", folder.display());
        return Ok(report);
    }

    info!(
        "Processing {} files in '{}'...",
        label_files.len(),
        folder.display()
    );

    let pb = create_progress_bar(label_files.len() as u64, "Fixing labels", opts.show_progress);
    for path in &label_files {
        match fix_label_file(path, &mut report.labels) {
            Ok(fixed) => report.files.push(fixed),
            // An unreadable file is left untouched; the rest of the folder is still fixed.
            Err(LabelfixError::LabelRead { path, source }) => {
                warn!(
                    "Skipping unreadable label file '{}': {}",
                    path.display(),
                    source
                );
                report.unreadable.push(UnreadableFile {
                    file_name: display_name(&path),
                    reason: source.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Finished processing folder '{}'.", folder.display());
    Ok(report)
}

/// Fix a single label file in place, recording dropped tokens in `labels`.
pub fn fix_label_file(path: &Path, labels: &mut CleanReport) -> Result<FixedFile, LabelfixError> {
    let file_name = display_name(path);

    let content = fs::read_to_string(path).map_err(|source| LabelfixError::LabelRead {
        path: path.to_path_buf(),
        source,
    })?;

    let kept_before = labels.kept_count();
    let dropped_before = labels.dropped_count();
    let fixed = fix_label_text(&content, &file_name, labels);

    fs::write(path, fixed).map_err(|source| LabelfixError::LabelWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let fixed_file = FixedFile {
        file_name,
        labels_kept: labels.kept_count() - kept_before,
        labels_dropped: labels.dropped_count() - dropped_before,
    };
    debug!(
        "Rewrote '{}': {} kept, {} dropped",
        fixed_file.file_name, fixed_file.labels_kept, fixed_file.labels_dropped
    );
    Ok(fixed_file)
}

/// Clean label file content in memory.
///
/// `source` names the file in warnings; line numbers are 1-based.
pub fn fix_label_text(content: &str, source: &str, labels: &mut CleanReport) -> String {
    let mut tokens = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        tokens.extend(clean_label_line(line, source, line_idx + 1, labels));
    }
    render_label_file(&tokens)
}

fn collect_label_files(folder: &Path) -> Result<Vec<PathBuf>, LabelfixError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| LabelfixError::DirectoryWalk {
            path: folder.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && is_label_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_label_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(LABEL_SUFFIX))
        .unwrap_or(false)
}
