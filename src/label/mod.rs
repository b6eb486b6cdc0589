//! The label-token rule shared by the fixer and the splitter.
//!
//! A label token is one bounding box: an opaque class id followed by at least
//! four numeric coordinates. Tokens arrive either comma-delimited
//! (`0,0.5,0.5,0.2,0.2`) or space-delimited (`0 0.5 0.5 0.2 0.2`); both
//! normalize to the space-delimited form.

mod report;

pub use report::{CleanReport, CorruptLabel};

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::Serialize;
use thiserror::Error;

/// Minimum number of fields in a valid token: class id plus four coordinates.
pub const MIN_FIELDS: usize = 5;

/// Why a label token was rejected.
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenError {
    #[error("expected at least {min} fields, found {found}", min = MIN_FIELDS)]
    TooFewFields { found: usize },

    #[error("field {position} '{value}' is not a number")]
    InvalidCoordinate { position: usize, value: String },

    #[error("field {position} '{value}' is not finite")]
    NonFiniteCoordinate { position: usize, value: String },
}

/// A validated, normalized label token.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelToken {
    class_id: String,
    coords: Vec<f64>,
    text: String,
}

impl LabelToken {
    /// Validate a raw token and normalize it to space-delimited form.
    ///
    /// Commas are treated as whitespace. Each field keeps its original
    /// spelling in the normalized text, so re-parsing the output yields the
    /// same token.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let spaced = raw.replace(',', " ");
        let fields: Vec<&str> = spaced.split_whitespace().collect();

        if fields.len() < MIN_FIELDS {
            return Err(TokenError::TooFewFields {
                found: fields.len(),
            });
        }

        let coords = fields
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, field)| parse_coordinate(field, idx + 1))
            .collect::<Result<Vec<f64>, TokenError>>()?;

        Ok(Self {
            class_id: fields[0].to_string(),
            coords,
            text: fields.join(" "),
        })
    }

    /// The class id, exactly as written.
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// The coordinate values following the class id.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The normalized, space-delimited text of this token.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for LabelToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LabelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_coordinate(raw: &str, position: usize) -> Result<f64, TokenError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| TokenError::InvalidCoordinate {
            position,
            value: raw.to_string(),
        })?;

    if !value.is_finite() {
        return Err(TokenError::NonFiniteCoordinate {
            position,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

/// Split a trimmed label line into raw label tokens.
///
/// A line containing any comma is split on whitespace and every piece is a
/// token of its own. A comma-free line is one space-delimited token, so a
/// line that is already `0 0.5 0.5 0.2 0.2` stays a single box.
pub fn split_label_tokens(line: &str) -> Vec<String> {
    if !line.contains(',') {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Vec::new();
        }
        return vec![fields.join(" ")];
    }

    line.split_whitespace().map(str::to_string).collect()
}

/// Clean one label line.
///
/// Returns the valid tokens in discovery order. Each corrupt token is
/// recorded in `report` and logged as a warning naming `source` and the
/// 1-based `line_num`. Blank lines yield nothing.
pub fn clean_label_line(
    line: &str,
    source: &str,
    line_num: usize,
    report: &mut CleanReport,
) -> Vec<LabelToken> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut kept = Vec::new();
    for raw in split_label_tokens(trimmed) {
        match LabelToken::parse(&raw) {
            Ok(token) => kept.push(token),
            Err(reason) => {
                warn!(
                    "Skipping corrupt label in '{}' line {}: {} ({})",
                    source, line_num, raw, reason
                );
                report.add_corrupt(CorruptLabel {
                    source: source.to_string(),
                    line: line_num,
                    token: raw,
                    reason,
                });
            }
        }
    }

    report.add_kept(kept.len());
    kept
}

/// Render tokens as label file content: one token per line, each ending in `\n`.
pub fn render_label_file(tokens: &[LabelToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.as_str());
        out.push('\n');
    }
    out
}
