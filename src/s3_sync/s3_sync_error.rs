use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while reading or interpreting s3 sync output.
#[derive(Error, Debug)]
pub enum S3SyncError {
    #[error("Unable to read sync output file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find sync progress in sync output: '{line}'")]
    Parse { line: String },

    #[error("Number '{value}' is out of range in sync output: '{line}'")]
    NumberOutOfRange { value: String, line: String },

    #[error("Invalid data unit '{unit}', must be K, M or G")]
    InvalidUnit { unit: String },
}

impl S3SyncError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
