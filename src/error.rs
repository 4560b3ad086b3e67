//! Error type shared by the model, the readers, and the exporters.

use crate::datasets::SourceColumn;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`].
///
/// Lets a caller tell "the input is malformed" apart from "the thing you asked
/// for is not there" without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong column mapping, unreadable stream, unknown format tag.
    Structural,
    /// A requested area, measure, name, or year does not exist.
    Lookup,
    /// A supplied value is malformed (e.g. a language code).
    Validation,
    /// A field could not be converted to its expected type.
    Parse,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected {expected} columns in the column mapping, got {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column mapping has no entry for {0:?}")]
    MissingColumn(SourceColumn),

    #[error("header {0:?} not found in input")]
    MissingHeader(String),

    #[error("record {record}: field {column:?} is missing")]
    MissingField { record: usize, column: String },

    #[error("unexpected data type: {0}")]
    UnknownFormat(String),

    #[error("failed to open file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no area found matching {0}")]
    NoArea(String),

    #[error("no measure matching {0}")]
    NoMeasure(String),

    #[error("no name stored for language {0}")]
    NoName(String),

    #[error("no value found for year {0}")]
    NoValue(i32),

    #[error("language code must be three alphabetical letters only, got {0:?}")]
    InvalidLangCode(String),

    #[error("{context}: cannot parse {value:?} as {expected}")]
    Parse {
        context: String,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ColumnCount { .. }
            | Error::MissingColumn(_)
            | Error::MissingHeader(_)
            | Error::MissingField { .. }
            | Error::UnknownFormat(_)
            | Error::Open { .. }
            | Error::Io(_) => ErrorKind::Structural,
            Error::NoArea(_) | Error::NoMeasure(_) | Error::NoName(_) | Error::NoValue(_) => {
                ErrorKind::Lookup
            }
            Error::InvalidLangCode(_) => ErrorKind::Validation,
            Error::Parse { .. } => ErrorKind::Parse,
            // Ragged rows surface from the csv crate; bad field text is a parse failure.
            Error::Csv(e) => match e.kind() {
                csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Io(_) => {
                    ErrorKind::Structural
                }
                _ => ErrorKind::Parse,
            },
            Error::Json(e) if e.is_io() => ErrorKind::Structural,
            Error::Json(_) => ErrorKind::Parse,
        }
    }

    pub(crate) fn parse(context: impl Into<String>, value: &str, expected: &'static str) -> Self {
        Error::Parse {
            context: context.into(),
            value: value.to_string(),
            expected,
        }
    }
}
