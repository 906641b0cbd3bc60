//! Reference data error types.

use std::path::PathBuf;

/// Errors raised while building or loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Reading a data file failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid CSV or a row does not deserialize
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A row holds a value that does not parse
    #[error("{file} line {line}: {message}")]
    InvalidRow {
        file: &'static str,
        line: u64,
        message: String,
    },

    /// A name is referenced before it is defined
    #[error("unknown {kind} {name:?}")]
    Unknown { kind: &'static str, name: String },

    /// A name is defined twice
    #[error("duplicate {kind} {name:?}")]
    Duplicate { kind: &'static str, name: String },

    /// A line's kilometre posts do not strictly increase
    #[error("line {line:?}: kilometre posts must strictly increase at {station:?}")]
    NonIncreasingPost { line: String, station: String },

    /// A line has fewer than two stops
    #[error("line {0:?} needs at least two stops")]
    ShortLine(String),

    /// Exactly one dominant company is required
    #[error("expected exactly one dominant company, found {0}")]
    DominantCompany(usize),
}
