//! CLI entrypoint.
//! - Installs color-eyre for better error reports
//! - Parses CLI via `clap` using the `Cli` type from `crate::cli`
//! - Prints usage to stdout and exits 1 on bad arguments
//! - Invokes the status report
use eyre::Result;
use s3_sync_status::cli::Cli;

/// Entrypoint for the program to reduce coupling to the name of this crate.
///
/// # Errors
///
/// Returns an error if the sync output cannot be read or parsed.
fn main() -> Result<()> {
    // Install error/reporting hooks
    color_eyre::install()?;

    let cli = match Cli::parse_or_usage(std::env::args_os()) {
        Ok(cli) => cli,
        Err(exit) => exit.exit(),
    };

    cli.invoke()?;

    Ok(())
}
