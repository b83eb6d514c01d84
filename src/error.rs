// Error taxonomy for phase profile computation and export.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type PhaseResult<T> = Result<T, PhaseError>;

#[derive(Error, Debug)]
pub enum PhaseError {
    /// A required form field was blank.
    #[error("Fill all input fields: {field} is empty")]
    MissingInput { field: &'static str },

    /// A field could not be parsed as its numeric type.
    #[error("{field} must be a number, got {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("N must be between {min} and {max}, got {value}")]
    Range { value: i64, min: usize, max: usize },

    #[error("Compute phase shifts first")]
    NoResult,

    #[error("I/O error on {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PhaseError {
    /// True for errors caused by what the user typed into the form.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PhaseError::MissingInput { .. } | PhaseError::Parse { .. } | PhaseError::Range { .. }
        )
    }

    pub(crate) fn export_io(path: impl Into<PathBuf>, source: io::Error) -> PhaseError {
        PhaseError::ExportIo {
            path: path.into(),
            source,
        }
    }
}
