use crate::cli::arbitrary_values;
use crate::cli::to_args::ToArgs;
use crate::s3_sync::s3_sync_report::S3SyncReport;
use crate::s3_sync::s3_sync_report::UnparsedLinePolicy;
use arbitrary::Arbitrary;
use clap::Args;
use clap::ValueEnum;
use eyre::WrapErr;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct SyncStatusArgs {
    /// File the s3 sync command writes its standard output to
    #[arbitrary(with = arbitrary_values::file_path)]
    pub output_file: PathBuf,
    /// File the s3 sync command writes its standard error to
    #[arbitrary(with = arbitrary_values::file_path)]
    pub error_file: PathBuf,
    /// How to report a last line that is neither progress nor completion
    #[arg(long, value_enum, default_value_t = UnparsedLinePolicy::Fail)]
    pub on_unparsed: UnparsedLinePolicy,
}

impl SyncStatusArgs {
    /// Build the sync status report and print it as one line of JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync output cannot be read, or its last line
    /// cannot be parsed under the `fail` policy.
    pub fn invoke(self) -> eyre::Result<()> {
        let report = self.report()?;
        if let Some(completion) = report.completion
            && !completion.succeeded()
        {
            warn!(exit_code = completion.exit_code, "s3 sync finished unsuccessfully");
        }
        info!(
            finished = report.is_finished(),
            has_errors = report.has_errors,
            "Reporting sync status"
        );
        println!("{}", serde_json::to_string(&report)?);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`SyncStatusArgs::invoke`].
    pub fn report(&self) -> eyre::Result<S3SyncReport> {
        S3SyncReport::collect(&self.output_file, &self.error_file, self.on_unparsed)
            .wrap_err_with(|| {
                format!(
                    "Failed to determine sync status from {}",
                    self.output_file.display()
                )
            })
    }
}

impl ToArgs for SyncStatusArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.output_file.clone().into(),
            self.error_file.clone().into(),
        ];
        if self.on_unparsed != UnparsedLinePolicy::default()
            && let Some(value) = self.on_unparsed.to_possible_value()
        {
            args.push("--on-unparsed".into());
            args.push(value.get_name().into());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_positionals_and_policy() -> eyre::Result<()> {
        let cli = Cli::try_parse_from([
            "s3-sync-status",
            "sync.out",
            "sync.err",
            "--on-unparsed",
            "empty-status",
        ])?;
        assert_eq!(cli.sync_status_args.output_file, PathBuf::from("sync.out"));
        assert_eq!(cli.sync_status_args.error_file, PathBuf::from("sync.err"));
        assert_eq!(
            cli.sync_status_args.on_unparsed,
            UnparsedLinePolicy::EmptyStatus
        );
        Ok(())
    }

    #[test]
    fn report_for_garbage_follows_policy() -> eyre::Result<()> {
        let mut output = NamedTempFile::new()?;
        writeln!(output, "garbage unrelated text")?;
        output.flush()?;
        let dir = tempfile::tempdir()?;
        let mut args = SyncStatusArgs {
            output_file: output.path().to_path_buf(),
            error_file: dir.path().join("sync.err"),
            on_unparsed: UnparsedLinePolicy::Fail,
        };
        let err = args.report().unwrap_err();
        assert!(format!("{err:?}").contains("Could not find sync progress"), "{err:?}");

        args.on_unparsed = UnparsedLinePolicy::EmptyStatus;
        let report = args.report()?;
        assert_eq!(
            serde_json::to_string(&report)?,
            r#"{"status":{},"hasErrors":false}"#
        );
        Ok(())
    }
}
