//! Errors raised when a dataset or a parameter breaks
//! the input contract of the tree learner.
use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Every failure this crate reports.
/// Degenerate statistics and unclassifiable rows are **not** errors;
/// they are handled inside the algorithms.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The dataset (or a subset that must not be empty) has no rows.
    #[error("the dataset has no rows")]
    EmptyDataset,

    /// The header names no attribute besides the label.
    #[error("the schema must name at least one attribute and the label")]
    EmptySchema,

    /// A row does not have one value per column.
    #[error("row {row} has {got} values, but the schema has {expected} columns")]
    RowLength {
        /// Index of the offending row.
        row: usize,
        /// Number of columns, label included.
        expected: usize,
        /// Number of values found, label included.
        got: usize,
    },

    /// A label is neither `yes` nor `no`.
    #[error("row {row} has label `{label}`, expected `yes` or `no`")]
    UnknownLabel {
        /// Index of the offending row.
        row: usize,
        /// The label as written.
        label: String,
    },

    /// A numeric attribute holds a token that is not an integer.
    #[error("row {row}: attribute `{attribute}` is numeric, but got `{token}`")]
    NotNumeric {
        /// Index of the offending row.
        row: usize,
        /// Name of the attribute.
        attribute: String,
        /// The token as written.
        token: String,
    },

    /// A categorical attribute holds a number.
    #[error("row {row}: attribute `{attribute}` is categorical, but got the number {value}")]
    NotCategorical {
        /// Index of the offending row.
        row: usize,
        /// Name of the attribute.
        attribute: String,
        /// The number found.
        value: i64,
    },

    /// Two attributes share a name.
    #[error("attribute `{0}` appears twice in the schema")]
    DuplicateAttribute(String),

    /// A name that is not an attribute of the schema.
    #[error("attribute `{0}` does not exist")]
    UnknownAttribute(String),

    /// The induction reached an empty subset with no parent statistics.
    #[error("an empty subset without parent statistics has no outcome")]
    UnresolvableOutcome,

    /// A parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A tree could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
