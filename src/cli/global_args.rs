use crate::cli::arbitrary_values;
use crate::cli::json_log_behaviour::JsonLogBehaviour;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

/// Logging switches shared by every invocation.
#[derive(Args, Default, Arbitrary, PartialEq, Debug)]
pub struct GlobalArgs {
    /// Enable debug logging on stderr
    #[clap(long)]
    pub debug: bool,

    /// Also write JSON lines logs, to `--json=FILE` or a timestamped file.
    /// The value must be attached with `=` so positionals are never consumed.
    #[clap(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "",
        require_equals = true
    )]
    #[arbitrary(with = arbitrary_values::json_target)]
    json: Option<String>,
}

impl GlobalArgs {
    /// Logs stay quiet unless asked for, stderr is read by the orchestrator.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }

    #[must_use]
    pub fn json_log_behaviour(&self) -> JsonLogBehaviour {
        match self.json.as_deref() {
            None => JsonLogBehaviour::None,
            Some("") => JsonLogBehaviour::SomeAutomaticPath,
            Some(path) => JsonLogBehaviour::Some(path.into()),
        }
    }
}

impl ToArgs for GlobalArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if self.debug {
            args.push("--debug".into());
        }
        match self.json.as_deref() {
            None => {}
            Some("") => args.push("--json".into()),
            Some(path) => args.push(format!("--json={path}").into()),
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::cli::json_log_behaviour::JsonLogBehaviour;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn bare_json_flag_leaves_positionals_alone() -> eyre::Result<()> {
        let cli = Cli::try_parse_from(["s3-sync-status", "--json", "out.log", "err.log"])?;
        assert_eq!(
            cli.global_args.json_log_behaviour(),
            JsonLogBehaviour::SomeAutomaticPath
        );
        assert_eq!(cli.sync_status_args.output_file, PathBuf::from("out.log"));
        assert_eq!(cli.sync_status_args.error_file, PathBuf::from("err.log"));
        Ok(())
    }

    #[test]
    fn json_path_is_attached_with_equals() -> eyre::Result<()> {
        let cli = Cli::try_parse_from(["s3-sync-status", "out.log", "err.log", "--json=status.jsonl"])?;
        assert_eq!(
            cli.global_args.json_log_behaviour(),
            JsonLogBehaviour::Some(PathBuf::from("status.jsonl"))
        );
        assert_eq!(cli.global_args.log_level(), tracing::Level::WARN);
        Ok(())
    }

    #[test]
    fn no_json_flag_means_no_json_log() -> eyre::Result<()> {
        let cli = Cli::try_parse_from(["s3-sync-status", "out.log", "err.log", "--debug"])?;
        assert_eq!(cli.global_args.json_log_behaviour(), JsonLogBehaviour::None);
        assert_eq!(cli.global_args.log_level(), tracing::Level::DEBUG);
        Ok(())
    }
}
