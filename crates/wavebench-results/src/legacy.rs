//! Header-aware extraction for the template flow.
//!
//! Older testbenches always dump `v(a)` and `v(y)`, and the output may carry
//! a header line (`Index time v(a) v(y)` or `time v(a) v(y)`). With a header,
//! columns are located by name; without one, the column count must match an
//! indexed or plain layout exactly.

use crate::error::{Error, Result};
use crate::types::Waveform;
use crate::wrdata::{Layout, content_lines, numeric_row, slot_columns};

/// Vectors written by template testbenches.
pub const LEGACY_LABELS: [&str; 2] = ["v(a)", "v(y)"];

/// Extract `v(a)` and `v(y)`.
pub fn extract_legacy(document: &str) -> Result<Waveform> {
    extract_named(document, &LEGACY_LABELS)
}

/// Extract `labels` from a document that may start with a header line.
pub fn extract_named<S: AsRef<str>>(document: &str, labels: &[S]) -> Result<Waveform> {
    let lines = content_lines(document);
    let Some((&first, rest)) = lines.split_first() else {
        return Err(Error::EmptyResults);
    };

    match numeric_row(first) {
        Some(row) => positional(&lines, row.len(), labels),
        None => by_header(first, rest, labels),
    }
}

fn positional<S: AsRef<str>>(lines: &[&str], columns: usize, labels: &[S]) -> Result<Waveform> {
    let layout = if columns >= labels.len() + 2 {
        Layout::INDEXED
    } else if columns == labels.len() + 1 {
        Layout::PLAIN
    } else {
        return Err(Error::UnexpectedColumnCount {
            columns,
            labels: labels.len(),
        });
    };

    let mut waveform = Waveform::with_labels(labels);
    let slots = slot_columns(labels, layout);
    let expected_columns = layout.data_start + labels.len();

    for line in lines {
        let Some(row) = numeric_row(line) else {
            continue;
        };
        if row.len() < expected_columns {
            continue;
        }
        let values: Vec<f64> = slots.iter().map(|&c| row[c]).collect();
        waveform.push_row(row[layout.time], &values);
    }

    if waveform.is_empty() {
        return Err(Error::NoRowsParsed { expected_columns });
    }
    Ok(waveform)
}

fn by_header<S: AsRef<str>>(header: &str, rows: &[&str], labels: &[S]) -> Result<Waveform> {
    let names: Vec<String> = header.split_whitespace().map(str::to_lowercase).collect();
    let find = |name: &str| {
        let wanted = name.to_lowercase();
        names
            .iter()
            .position(|n| *n == wanted)
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
                header: header.split_whitespace().map(str::to_string).collect(),
            })
    };

    let time_col = find("time")?;
    let mut waveform = Waveform::with_labels(labels);
    let mut value_cols = Vec::with_capacity(waveform.channels.len());
    for label in waveform.labels() {
        value_cols.push(find(label)?);
    }
    log::debug!("header columns: time={} values={:?}", time_col, value_cols);

    for line in rows {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(time) = column(&tokens, time_col) else {
            continue;
        };
        let Some(values) = value_cols
            .iter()
            .map(|&c| column(&tokens, c))
            .collect::<Option<Vec<f64>>>()
        else {
            continue;
        };
        waveform.push_row(time, &values);
    }

    if waveform.is_empty() {
        return Err(Error::NoRowsParsed {
            expected_columns: names.len(),
        });
    }
    Ok(waveform)
}

fn column(tokens: &[&str], col: usize) -> Option<f64> {
    tokens.get(col).and_then(|t| t.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headerless_layouts() {
        let w = extract_legacy("0.0 0.0 1.2\n1e-9 1.2 0.0\n").unwrap();
        assert_eq!(w.time, [0.0, 1e-9]);
        assert_eq!(w.channel("v(y)"), Some(&[1.2, 0.0][..]));

        let w = extract_legacy("0 0.0 0.0 1.2 9.9\n1 1e-9 1.2 0.0 9.9\n").unwrap();
        assert_eq!(w.time, [0.0, 1e-9]);
        assert_eq!(w.channel("v(a)"), Some(&[0.0, 1.2][..]));
    }

    #[test]
    fn test_headerless_bad_column_count() {
        assert!(matches!(
            extract_legacy("0.0 1.0\n"),
            Err(Error::UnexpectedColumnCount { columns: 2, labels: 2 })
        ));
    }

    #[test]
    fn test_header_columns_by_name() {
        let doc = "Index   TIME   V(Y)   V(A)\n0 0.0 1.2 0.0\n1 1e-9 0.0 1.2\n";
        let w = extract_legacy(doc).unwrap();
        assert_eq!(w.time, [0.0, 1e-9]);
        assert_eq!(w.channel("v(a)"), Some(&[0.0, 1.2][..]));
        assert_eq!(w.channel("v(y)"), Some(&[1.2, 0.0][..]));
    }

    #[test]
    fn test_header_rows_must_fully_parse() {
        let doc = "time v(a) v(y)\n0.0 0.0 1.2\n1e-9 x 0.5\n2e-9 1.2\n3e-9 1.2 0.0\n";
        let w = extract_legacy(doc).unwrap();
        assert_eq!(w.time, [0.0, 3e-9]);
        assert_eq!(w.channel("v(a)").map(<[f64]>::len), Some(2));
        assert_eq!(w.channel("v(y)"), Some(&[1.2, 0.0][..]));
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            extract_legacy("idx v(a) v(y)\n0 1 2\n"),
            Err(Error::UnknownColumn { ref name, .. }) if name == "time"
        ));
        assert!(matches!(
            extract_legacy("time v(a)\n0 1\n"),
            Err(Error::UnknownColumn { ref name, .. }) if name == "v(y)"
        ));
        assert!(matches!(
            extract_legacy("time v(a) v(y)\n"),
            Err(Error::NoRowsParsed { .. })
        ));
        assert!(matches!(extract_legacy(""), Err(Error::EmptyResults)));
    }
}
