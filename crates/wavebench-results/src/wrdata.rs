//! Reader for `wrdata` ASCII output.
//!
//! `wrdata` writes whitespace-separated columns without a header:
//!
//! ```text
//! [index] time v(node1) v(node2) ...
//! ```
//!
//! The labels passed to [`extract`] must be in the order the vectors were
//! written. Whether the leading index column is present is decided from the
//! first numeric line.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Waveform;

/// Column positions of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub time: usize,
    pub data_start: usize,
}

impl Layout {
    pub const INDEXED: Layout = Layout {
        time: 1,
        data_start: 2,
    };
    pub const PLAIN: Layout = Layout {
        time: 0,
        data_start: 1,
    };

    /// Infer the layout from the first numeric row and the label count.
    fn infer(first: &[&str], labels: usize) -> Self {
        if first.len() == labels + 2 {
            Layout::INDEXED
        } else if first.len() == labels + 1 {
            Layout::PLAIN
        } else if looks_indexed(first) {
            Layout::INDEXED
        } else {
            Layout::PLAIN
        }
    }
}

/// First token an integer and second a float.
fn looks_indexed(first: &[&str]) -> bool {
    matches!(first, [index, time, ..]
        if index.parse::<i64>().is_ok() && time.parse::<f64>().is_ok())
}

/// Trimmed, non-blank lines.
pub(crate) fn content_lines(document: &str) -> Vec<&str> {
    document
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse a line whose every token is a number.
pub(crate) fn numeric_row(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace()
        .map(|tok| tok.parse::<f64>().ok())
        .collect()
}

/// Extract labelled waveforms from a `wrdata` document.
///
/// Non-numeric lines (headers, simulator chatter) and rows too short for
/// the inferred layout are skipped.
pub fn extract<S: AsRef<str>>(document: &str, labels: &[S]) -> Result<Waveform> {
    let lines = content_lines(document);
    if lines.is_empty() {
        return Err(Error::EmptyResults);
    }

    let first = lines
        .iter()
        .find(|l| numeric_row(l).is_some())
        .ok_or_else(|| Error::NoNumericData {
            first_line: lines[0].chars().take(80).collect(),
        })?;
    let first_tokens: Vec<&str> = first.split_whitespace().collect();
    let layout = Layout::infer(&first_tokens, labels.len());
    log::debug!(
        "wrdata layout {:?} from {} columns, {} labels",
        layout,
        first_tokens.len(),
        labels.len()
    );

    let mut waveform = Waveform::with_labels(labels);
    let columns = slot_columns(labels, layout);
    let expected_columns = layout.data_start + labels.len();
    let mut skipped = 0usize;
    let mut values = Vec::with_capacity(columns.len());

    for line in &lines {
        let Some(row) = numeric_row(line) else {
            skipped += 1;
            continue;
        };
        if row.len() < expected_columns {
            skipped += 1;
            continue;
        }
        values.clear();
        values.extend(columns.iter().map(|&c| row[c]));
        waveform.push_row(row[layout.time], &values);
    }

    if waveform.is_empty() {
        return Err(Error::NoRowsParsed { expected_columns });
    }
    if skipped > 0 {
        log::debug!("skipped {} non-data lines", skipped);
    }
    Ok(waveform)
}

/// Read and extract a `wrdata` file.
pub fn read_wrdata<S: AsRef<str>>(path: impl AsRef<Path>, labels: &[S]) -> Result<Waveform> {
    let text = std::fs::read_to_string(path.as_ref())?;
    extract(&text, labels)
}

/// Column of each distinct label's first occurrence.
pub(crate) fn slot_columns<S: AsRef<str>>(labels: &[S], layout: Layout) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if seen.insert(label.as_ref()) {
            columns.push(layout.data_start + i);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 2] = ["v(a)", "v(y)"];

    #[test]
    fn test_layout_by_column_count() {
        assert_eq!(Layout::infer(&["0", "0.0", "1", "2"], 2), Layout::INDEXED);
        assert_eq!(Layout::infer(&["0.0", "1", "2"], 2), Layout::PLAIN);
    }

    #[test]
    fn test_layout_heuristic() {
        assert_eq!(Layout::infer(&["3", "1e-9", "1", "2", "5"], 2), Layout::INDEXED);
        assert_eq!(Layout::infer(&["1e-9", "1", "2", "5", "6"], 2), Layout::PLAIN);
        assert_eq!(Layout::infer(&["3"], 2), Layout::PLAIN);
    }

    #[test]
    fn test_plain_rows() {
        let w = extract("0 0 1.2\n1e-9 1.2 0\n", &LABELS).unwrap();
        assert_eq!(w.time, [0.0, 1e-9]);
        assert_eq!(w.channel("v(a)"), Some(&[0.0, 1.2][..]));
        assert_eq!(w.channel("v(y)"), Some(&[1.2, 0.0][..]));
    }

    #[test]
    fn test_indexed_rows_with_noise() {
        let doc = "\n Index time v(a) v(y)\n0 0.0 0.0 1.2\nwarning: something\n1 1e-9 1.2 0.1\n2 2e-9\n";
        let w = extract(doc, &LABELS).unwrap();
        assert_eq!(w.time, [0.0, 1e-9]);
        assert_eq!(w.channel("v(y)"), Some(&[1.2, 0.1][..]));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(extract(" \n\n", &LABELS), Err(Error::EmptyResults)));
        assert!(matches!(
            extract("time v(a) v(y)\nno data", &LABELS),
            Err(Error::NoNumericData { .. })
        ));
        assert!(matches!(
            extract("0.0\n1.0\n", &LABELS),
            Err(Error::NoRowsParsed { expected_columns: 3 })
        ));
    }

    #[test]
    fn test_duplicate_labels_keep_first_column() {
        let w = extract("0.0 1 2 3\n", &["v(a)", "v(y)", "v(a)"]).unwrap();
        assert_eq!(w.channels.len(), 2);
        assert_eq!(w.channel("v(a)"), Some(&[1.0][..]));
        assert_eq!(w.channel("v(y)"), Some(&[2.0][..]));
    }
}
