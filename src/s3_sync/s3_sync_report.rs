use crate::s3_sync::error_log::load_error_log;
use crate::s3_sync::s3_sync_completion::CompletionResult;
use crate::s3_sync::s3_sync_error::S3SyncError;
use crate::s3_sync::s3_sync_line::SyncLine;
use crate::s3_sync::s3_sync_status::SyncStatus;
use crate::s3_sync::tail::read_last_line;
use arbitrary::Arbitrary;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use tracing::warn;

/// What to do when the last line of sync output is neither a progress line
/// nor the completion sentinel.
#[derive(ValueEnum, Arbitrary, Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum UnparsedLinePolicy {
    /// Fail the run with a parse error.
    #[default]
    Fail,
    /// Report an empty `status` object and carry on.
    EmptyStatus,
}

/// Serializes as `{}`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct EmptyStatus {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportStatus {
    Progress(SyncStatus),
    Unknown(EmptyStatus),
}

/// The JSON object printed for the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct S3SyncReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(flatten)]
    pub completion: Option<CompletionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(rename = "hasErrors")]
    pub has_errors: bool,
}

impl S3SyncReport {
    /// Build a report from an already tailed line and the error log contents.
    ///
    /// # Errors
    ///
    /// Returns the classification error unless `policy` allows an unparsed
    /// line to degrade to an empty status.
    pub fn from_line(
        line: &str,
        errors: Option<Vec<String>>,
        policy: UnparsedLinePolicy,
    ) -> Result<Self, S3SyncError> {
        let (status, completion) = match SyncLine::classify(line) {
            Ok(SyncLine::Completed(completion)) => (None, Some(completion)),
            Ok(SyncLine::Progress(status)) => (Some(ReportStatus::Progress(status)), None),
            Err(S3SyncError::Parse { line }) if policy == UnparsedLinePolicy::EmptyStatus => {
                warn!(%line, "Could not find sync progress, reporting empty status");
                (Some(ReportStatus::Unknown(EmptyStatus {})), None)
            }
            Err(error) => return Err(error),
        };
        let has_errors = errors.as_ref().is_some_and(|e| !e.is_empty());
        Ok(Self {
            status,
            completion,
            errors,
            has_errors,
        })
    }

    /// Tail the sync output, load the error log and build a report.
    ///
    /// # Errors
    ///
    /// Returns [`S3SyncError::FileAccess`] if the sync output cannot be read,
    /// and otherwise behaves like [`S3SyncReport::from_line`].
    pub fn collect(
        output_file_path: &Path,
        error_file_path: &Path,
        policy: UnparsedLinePolicy,
    ) -> Result<Self, S3SyncError> {
        let line = read_last_line(output_file_path)?;
        debug!(path = %output_file_path.display(), %line, "Read last line of sync output");
        let errors = load_error_log(error_file_path);
        Self::from_line(&line, errors, policy)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completion.is_some_and(|c| c.finished)
    }
}
