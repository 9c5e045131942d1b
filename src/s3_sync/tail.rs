use crate::s3_sync::s3_sync_error::S3SyncError;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use tracing::trace;

const TAIL_BLOCK_SIZE: u64 = 4096;

fn is_line_terminator(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Locate the last finished line in `tail`, the final bytes of a file.
///
/// Bytes after the last terminator may still be mid-write and are only used
/// when the file holds no finished non-empty line. `None` means more of the
/// file has to be read first.
fn last_finished_line(tail: &[u8], at_file_start: bool) -> Option<&[u8]> {
    let Some(last_terminator) = tail.iter().rposition(|&b| is_line_terminator(b)) else {
        return at_file_start.then_some(tail);
    };
    let finished = &tail[..last_terminator];
    match finished.iter().rposition(|&b| !is_line_terminator(b)) {
        Some(last_content) => {
            let end = last_content + 1;
            match finished[..end].iter().rposition(|&b| is_line_terminator(b)) {
                Some(start) => Some(&finished[start + 1..end]),
                None => at_file_start.then_some(&finished[..end]),
            }
        }
        // Only blank lines are finished so far.
        None => at_file_start.then_some(&tail[last_terminator + 1..]),
    }
}

/// Read the last finished, non-empty line of a file that may still be
/// appended to.
///
/// Lines end at `\n` or `\r`, since the sync tool redraws its progress line
/// with carriage returns. An unterminated trailing fragment is ignored unless
/// no finished line exists. The file is read backwards in blocks, so only the
/// tail is ever loaded. An empty file yields an empty string.
///
/// # Errors
///
/// Returns [`S3SyncError::FileAccess`] if the file cannot be opened or read.
pub fn read_last_line(path: &Path) -> Result<String, S3SyncError> {
    let io_err = |source| S3SyncError::file_access(path, source);
    let mut file = File::open(path).map_err(io_err)?;
    let mut pos = file.seek(SeekFrom::End(0)).map_err(io_err)?;

    // Bytes from `pos` to the end of the file as read so far.
    let mut tail: Vec<u8> = Vec::new();
    loop {
        if let Some(line) = last_finished_line(&tail, pos == 0) {
            return Ok(String::from_utf8_lossy(line).into_owned());
        }

        let read_len = pos.min(TAIL_BLOCK_SIZE);
        pos -= read_len;
        file.seek(SeekFrom::Start(pos)).map_err(io_err)?;
        let mut block = vec![0_u8; usize::try_from(read_len).unwrap_or(usize::MAX)];
        file.read_exact(&mut block).map_err(io_err)?;
        trace!(offset = pos, len = read_len, "Read block from end of sync output");
        block.extend_from_slice(&tail);
        tail = block;
    }
}
