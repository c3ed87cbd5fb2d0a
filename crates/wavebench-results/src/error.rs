//! Error types for the results crate.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading simulator output.
#[derive(Debug, Error)]
pub enum Error {
    /// The document has no non-blank lines.
    #[error("results document is empty")]
    EmptyResults,

    /// No line consists entirely of numbers.
    #[error("no numeric data rows (first line: {first_line:?})")]
    NoNumericData { first_line: String },

    /// Numeric lines exist but none has enough columns.
    #[error("no numeric rows parsed ({expected_columns} columns expected)")]
    NoRowsParsed { expected_columns: usize },

    /// A requested column is missing from the header line.
    #[error("column '{name}' not found in header {header:?}")]
    UnknownColumn { name: String, header: Vec<String> },

    /// A headerless document whose column count fits no known layout.
    #[error("unexpected numeric format with {columns} columns for {labels} labels")]
    UnexpectedColumnCount { columns: usize, labels: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
