use crate::s3_sync::s3_sync_completion::CompletionResult;
use crate::s3_sync::s3_sync_error::S3SyncError;
use crate::s3_sync::s3_sync_status::SyncStatus;
use tracing::debug;

/// What a single line of sync output turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncLine {
    Completed(CompletionResult),
    Progress(SyncStatus),
}

impl SyncLine {
    /// Classify one line of sync output.
    ///
    /// The completion sentinel is checked before the progress grammar.
    ///
    /// # Errors
    ///
    /// Returns [`S3SyncError::Parse`] when neither grammar matches, or
    /// [`S3SyncError::InvalidUnit`] from the progress parser.
    pub fn classify(line: &str) -> Result<Self, S3SyncError> {
        if let Some(completion) = CompletionResult::try_parse_completion(line) {
            debug!(exit_code = completion.exit_code, "Sync has finished");
            return Ok(SyncLine::Completed(completion));
        }
        let status = SyncStatus::parse_progress(line)?;
        debug!(%status, "Sync is in progress");
        Ok(SyncLine::Progress(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_completion() -> eyre::Result<()> {
        let line = SyncLine::classify("s3 sync with shared home complete with exit code 0")?;
        assert_eq!(
            line,
            SyncLine::Completed(CompletionResult {
                finished: true,
                exit_code: 0
            })
        );
        Ok(())
    }

    #[test]
    fn classify_progress() -> eyre::Result<()> {
        let line = SyncLine::classify(
            "Completed 47.2 MiB/430.5 MiB (5.0 MiB/s) with 528 file(s) remaining",
        )?;
        assert!(
            matches!(&line, SyncLine::Progress(status) if status.files_remaining == 528),
            "{line:?}"
        );
        Ok(())
    }

    #[test]
    fn classify_garbage() {
        let err = SyncLine::classify("garbage unrelated text").unwrap_err();
        assert!(matches!(err, S3SyncError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn grammars_are_mutually_exclusive() {
        let completion = "s3 sync with shared home complete with exit code 3";
        let progress =
            "Completed 0.0 KiB/~100.0 GiB (0.0 KiB/s) with ~500 file(s) remaining (calculating...)";
        assert!(SyncStatus::parse_progress(completion).is_err());
        assert!(CompletionResult::try_parse_completion(progress).is_none());
        assert!(SyncStatus::parse_progress(progress).is_ok());
        assert!(CompletionResult::try_parse_completion(completion).is_some());
    }
}
