//! Library root for the `s3-sync-status` crate.
//!
//! Reads the last line of an `aws s3 sync` output file, recognises either a
//! progress line or the completion sentinel written by the restore job, and
//! produces the JSON status report consumed by the migration orchestrator.

pub mod cli;
pub mod logging;
pub mod s3_sync;

/// Re-export the logging initializer so callers can do `s3_sync_status::init_tracing`.
pub use crate::logging::init_tracing;

/// Re-export the default JSON log path helper.
pub use crate::logging::default_json_log_path;
