use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::warn;

/// Left behind by the restore document once `aws s3 sync` has exited.
static COMPLETION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"s3 sync with shared home complete with exit code ([0-9]+)")
        .expect("completion pattern is a valid regex")
});

/// Terminal state of the sync, serialized as `"finished": true, "code": <int>`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CompletionResult {
    pub finished: bool,
    #[serde(rename = "code")]
    pub exit_code: i32,
}

impl CompletionResult {
    /// Look for the completion sentinel in a line of sync output.
    ///
    /// A line without the sentinel is the common case and yields `None`.
    #[must_use]
    pub fn try_parse_completion(line: &str) -> Option<Self> {
        let caps = COMPLETION_REGEX.captures(line)?;
        match caps[1].parse::<i32>() {
            Ok(exit_code) => Some(Self {
                finished: true,
                exit_code,
            }),
            Err(error) => {
                warn!(code = &caps[1], %error, "Ignoring completion line with out of range exit code");
                None
            }
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
