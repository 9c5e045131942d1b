use crate::cli::json_log_behaviour::JsonLogBehaviour;
use chrono::Local;
use eyre::Result;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::Level;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Initialize tracing with a human-friendly stderr layer and, when
/// `json_behaviour` asks for one, a JSON lines file layer.
///
/// Nothing is ever written to stdout, which carries the status report.
///
/// # Errors
///
/// Returns an error if directory creation or file access for the JSON log fails.
/// If a global subscriber is already installed (commonly when several tests
/// share a process) a diagnostic is printed to stderr and `Ok(())` is returned.
pub fn init_tracing(level: Level, json_behaviour: &JsonLogBehaviour) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().parse_lossy(level.to_string()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(cfg!(debug_assertions))
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty();

    let json_log_path = json_behaviour.get_path().map(|p| p.into_owned());
    let json_layer = match &json_log_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = Arc::new(Mutex::new(File::create(path)?));
            let json_writer = BoxMakeWriter::new(move || {
                file.lock()
                    .expect("failed to lock json log file")
                    .try_clone()
                    .expect("failed to clone json log file handle")
            });
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(tracing_subscriber::fmt::format().json())
                    .with_file(true)
                    .with_target(false)
                    .with_line_number(true)
                    .with_writer(json_writer),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(json_layer);
    if let Err(error) = subscriber.try_init() {
        eprintln!(
            "Failed to initialize tracing subscriber - are you running `cargo test`? If so, multiple test entrypoints may be running from the same process. https://github.com/tokio-rs/console/issues/505 : {error}"
        );
        return Ok(());
    }

    if let Some(path) = json_log_path {
        info!(path = %path.display(), "JSON log output initialized");
    }
    debug!("Tracing initialized with level: {:?}", level);
    Ok(())
}

/// Return a default JSON log path when the user requests automatic JSON path selection.
///
/// The format uses a timestamp to avoid collisions: `s3_sync_status_log_{TIMESTAMP}.jsonl`
#[must_use]
pub fn default_json_log_path() -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%Hh%Mm%Ss");
    PathBuf::from(format!("s3_sync_status_log_{timestamp}.jsonl"))
}
