use std::path::Path;
use tracing::debug;

/// Load the lines of the sync tool's error output.
///
/// A missing, unreadable or empty file means there is nothing to report and
/// yields `None`; it never aborts the run. Invalid UTF-8 is decoded lossily.
#[must_use]
pub fn load_error_log(path: &Path) -> Option<Vec<String>> {
    let contents = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(error) => {
            debug!(path = %path.display(), %error, "No readable error log");
            return None;
        }
    };
    let lines: Vec<String> = contents.lines().map(str::to_string).collect();
    if lines.is_empty() {
        debug!(path = %path.display(), "Error log is empty");
        return None;
    }
    debug!(path = %path.display(), count = lines.len(), "Loaded error log");
    Some(lines)
}
