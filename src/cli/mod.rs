pub(crate) mod arbitrary_values;
pub mod global_args;
pub mod json_log_behaviour;
pub mod sync_status_args;
pub mod to_args;

use crate::cli::global_args::GlobalArgs;
use crate::cli::sync_status_args::SyncStatusArgs;
use arbitrary::Arbitrary;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use to_args::Invocable;
use to_args::ToArgs;
use tracing::debug;

/// Process exit status for a command line that could not be understood.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Report the progress of an s3 sync from the tail of its output as JSON
#[derive(Parser, Arbitrary, PartialEq, Debug)]
#[clap(version)]
pub struct Cli {
    #[clap(flatten)]
    pub sync_status_args: SyncStatusArgs,
    #[clap(flatten)]
    pub global_args: GlobalArgs,
}

/// Why argument parsing stopped short of a [`Cli`].
#[derive(Debug)]
pub enum CliExit {
    /// `--help` or `--version`, rendered by clap as usual.
    Informational(clap::Error),
    /// Wrong arity or a bad value. The usage line goes to stdout and clap's
    /// diagnostic to stderr.
    Usage { usage: String, diagnostic: String },
}

impl CliExit {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CliExit::Informational(error) => error.exit_code(),
            CliExit::Usage { .. } => USAGE_EXIT_CODE,
        }
    }

    /// Print whatever this exit reports and end the process.
    pub fn exit(self) -> ! {
        match self {
            CliExit::Informational(error) => error.exit(),
            CliExit::Usage { usage, diagnostic } => {
                eprint!("{diagnostic}");
                println!("{usage}");
                std::process::exit(USAGE_EXIT_CODE);
            }
        }
    }
}

impl Cli {
    /// Parse a full argument vector, including the executable name.
    ///
    /// # Errors
    ///
    /// Returns [`CliExit::Informational`] for `--help`/`--version` and
    /// [`CliExit::Usage`] for everything else clap rejects.
    pub fn parse_or_usage<I, T>(args: I) -> Result<Self, CliExit>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Cli::command();
        command
            .try_get_matches_from_mut(args)
            .and_then(|matches| Cli::from_arg_matches(&matches))
            .map_err(|error| match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    CliExit::Informational(error)
                }
                _ => CliExit::Usage {
                    usage: command.render_usage().to_string(),
                    diagnostic: error.render().to_string(),
                },
            })
    }

    /// Initialise logging and run the status report.
    ///
    /// # Errors
    ///
    /// Returns an error if tracing initialization or the report fails.
    pub fn invoke(self) -> eyre::Result<()> {
        let json_behaviour = self.global_args.json_log_behaviour();
        crate::logging::init_tracing(self.global_args.log_level(), &json_behaviour)?;
        debug!(invocation = %self.display_invocation(), "Starting");
        self.sync_status_args.invoke()
    }

    #[must_use]
    pub fn display_invocation(&self) -> String {
        let exe = self.path_to_exe();
        std::iter::once(exe.file_name().unwrap_or(exe.as_os_str()).to_owned())
            .chain(self.args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ToArgs for Cli {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        args.extend(self.sync_status_args.to_args());
        args.extend(self.global_args.to_args());
        args
    }
}

impl Invocable for Cli {
    fn path_to_exe(&self) -> std::path::PathBuf {
        std::env::current_exe().unwrap_or_else(|_| env!("CARGO_PKG_NAME").into())
    }

    fn args(&self) -> Vec<OsString> {
        self.to_args()
    }
}
