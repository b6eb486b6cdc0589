//! Label Splitter: splits an aggregate label file into one file per image.
//!
//! Each aggregate line is `<image_filename> <label tokens...>`. The output file
//! for an image is its name with the extension replaced by `.txt`, written
//! under the output folder. Every record produces a file, even when none of
//! its tokens survive.

mod report;

pub use report::{SkippedRecord, SplitReport};

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use crate::error::LabelfixError;
use crate::label::{clean_label_line, render_label_file};
use crate::progress::create_progress_bar;

/// Extension of the per-image label files.
pub const LABEL_EXTENSION: &str = "txt";

/// Options for the splitter.
#[derive(Clone, Debug, Default)]
pub struct SplitOptions {
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

/// One line of an aggregate label file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregateRecord<'a> {
    /// Image file name, as written.
    pub image: &'a str,
    /// Everything after the first whitespace run; empty when the image has no labels.
    pub labels: &'a str,
}

/// Split an aggregate line at its first whitespace run.
///
/// Returns `None` for blank lines.
pub fn parse_aggregate_line(line: &str) -> Option<AggregateRecord<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let record = match trimmed.split_once(char::is_whitespace) {
        Some((image, labels)) => AggregateRecord {
            image,
            labels: labels.trim_start(),
        },
        None => AggregateRecord {
            image: trimmed,
            labels: "",
        },
    };
    Some(record)
}

/// Derive the label file path for an image, relative to the output folder.
///
/// The extension is replaced with `.txt` (`img.jpg` becomes `img.txt`, `img`
/// becomes `img.txt`). Root and drive prefixes are dropped. Returns `None`
/// when the name contains `..` or has no file component at all.
pub fn label_path_for_image(image: &str) -> Option<PathBuf> {
    let mut rel = PathBuf::new();
    for component in Path::new(image).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }

    if rel.as_os_str().is_empty() {
        return None;
    }

    Some(rel.with_extension(LABEL_EXTENSION))
}

/// Split `input` into per-image label files under `output_dir`.
///
/// A missing input is an error and nothing is created. When two records map
/// to the same label file, the later record wins.
pub fn split_labels(
    input: &Path,
    output_dir: &Path,
    opts: &SplitOptions,
) -> Result<SplitReport, LabelfixError> {
    if !input.exists() {
        return Err(LabelfixError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let content = fs::read_to_string(input).map_err(|source| LabelfixError::LabelRead {
        path: input.to_path_buf(),
        source,
    })?;

    fs::create_dir_all(output_dir).map_err(|source| LabelfixError::OutputDirCreate {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let lines: Vec<&str> = content.lines().collect();
    info!(
        "Splitting {} lines from '{}' into '{}'...",
        lines.len(),
        input.display(),
        output_dir.display()
    );

    let mut report = SplitReport::new(input, output_dir);
    // Relative label path -> (aggregate line, labels kept) of the last write.
    let mut written: HashMap<PathBuf, (usize, usize)> = HashMap::new();

    let pb = create_progress_bar(lines.len() as u64, "Splitting labels", opts.show_progress);
    for (line_idx, line) in lines.iter().enumerate() {
        pb.inc(1);
        let line_num = line_idx + 1;

        let Some(record) = parse_aggregate_line(line) else {
            continue;
        };
        report.records += 1;

        let Some(rel_path) = label_path_for_image(record.image) else {
            warn!(
                "Skipping record in '{}' line {}: image name '{}' does not map into the output folder",
                input.display(),
                line_num,
                record.image
            );
            report.skipped.push(SkippedRecord {
                line: line_num,
                image: record.image.to_string(),
                reason: "image name does not map into the output folder".to_string(),
            });
            continue;
        };

        let tokens = clean_label_line(record.labels, record.image, line_num, &mut report.labels);

        let label_path = output_dir.join(&rel_path);
        if let Some(parent) = label_path.parent() {
            fs::create_dir_all(parent).map_err(|source| LabelfixError::OutputDirCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&label_path, render_label_file(&tokens)).map_err(|source| {
            LabelfixError::LabelWrite {
                path: label_path.clone(),
                source,
            }
        })?;
        debug!("Wrote {} label(s) to '{}'", tokens.len(), label_path.display());

        if let Some((previous_line, _)) = written.insert(rel_path, (line_num, tokens.len())) {
            warn!(
                "'{}' from line {} overwrites the labels written from line {}",
                label_path.display(),
                line_num,
                previous_line
            );
            report.collisions += 1;
        }
    }
    pb.finish_and_clear();

    report.files_written = written.len();
    report.empty_files = written.values().filter(|(_, kept)| *kept == 0).count();

    info!("Finished splitting labels into '{}'.", output_dir.display());
    Ok(report)
}
