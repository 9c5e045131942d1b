use crate::s3_sync::s3_sync_data_unit::DataUnit;
use crate::s3_sync::s3_sync_error::S3SyncError;
use humansize::BINARY;
use humansize::format_size_i;
use regex::Captures;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

/*
Completed 12.3 MiB/~45.6 MiB (1.2 MiB/s) with ~7 file(s) remaining (calculating...)
*/
static PROGRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Completed ([0-9]+(?:\.[0-9]+)?) ([KMG])iB/~?([0-9]+(?:\.[0-9]+)?) ([KMG])iB \([0-9]+(?:\.[0-9]+)? [KMG]iB/s\) with ~?([0-9]+) file\(s\) remaining( \(calculating\.\.\.\))?",
    )
    .expect("progress pattern is a valid regex")
});

/// Snapshot of an in-progress transfer taken from one progress line.
///
/// When `is_calculating` is set the sync tool is still estimating the size of
/// the transfer and `total_bytes` is provisional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStatus {
    #[serde(rename = "progress")]
    pub progress_bytes: f64,
    #[serde(rename = "files_remaining")]
    pub files_remaining: u64,
    #[serde(rename = "total")]
    pub total_bytes: f64,
    #[serde(rename = "isCalculating")]
    pub is_calculating: bool,
}

impl SyncStatus {
    /// Parse a progress line emitted by the sync tool.
    ///
    /// # Errors
    ///
    /// Returns [`S3SyncError::Parse`] when the line does not contain a progress
    /// report, [`S3SyncError::NumberOutOfRange`] when the file count does not
    /// fit a `u64`, or [`S3SyncError::InvalidUnit`] if a size carries an
    /// unknown unit.
    pub fn parse_progress(line: &str) -> Result<Self, S3SyncError> {
        let Some(caps) = PROGRESS_REGEX.captures(line) else {
            return Err(S3SyncError::Parse {
                line: line.to_string(),
            });
        };
        let progress_bytes = bytes_from(line, &caps, 1, 2)?;
        let total_bytes = bytes_from(line, &caps, 3, 4)?;
        let files_remaining: u64 = caps[5].parse().map_err(|_| out_of_range(line, &caps[5]))?;
        Ok(Self {
            progress_bytes,
            files_remaining,
            total_bytes,
            is_calculating: caps.get(6).is_some(),
        })
    }
}

fn out_of_range(line: &str, value: &str) -> S3SyncError {
    S3SyncError::NumberOutOfRange {
        value: value.to_string(),
        line: line.to_string(),
    }
}

fn bytes_from(
    line: &str,
    caps: &Captures<'_>,
    prefix_group: usize,
    unit_group: usize,
) -> Result<f64, S3SyncError> {
    let prefix: f64 = caps[prefix_group]
        .parse()
        .map_err(|_| out_of_range(line, &caps[prefix_group]))?;
    let unit = DataUnit::parse_letter(&caps[unit_group])?;
    Ok(unit.to_bytes(prefix))
}

impl FromStr for SyncStatus {
    type Err = S3SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_progress(s)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "byte counts are only rounded for display"
)]
impl Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{progress}/{approx}{total} with {files} file(s) remaining{calculating}",
            progress = format_size_i(self.progress_bytes as i64, BINARY),
            approx = if self.is_calculating { "~" } else { "" },
            total = format_size_i(self.total_bytes as i64, BINARY),
            files = self.files_remaining,
            calculating = if self.is_calculating {
                " (calculating...)"
            } else {
                ""
            },
        )
    }
}
