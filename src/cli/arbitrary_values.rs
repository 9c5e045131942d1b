//! Generators that keep `arbitrary` CLI values parseable by clap.

use arbitrary::Result;
use arbitrary::Unstructured;
use std::path::PathBuf;

const FILE_NAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";

pub(crate) fn file_name(u: &mut Unstructured<'_>) -> Result<String> {
    let len = u.int_in_range(1..=12)?;
    let mut name = String::with_capacity(len + 4);
    for _ in 0..len {
        name.push(char::from(*u.choose(FILE_NAME_CHARS)?));
    }
    name.push_str(".log");
    Ok(name)
}

pub(crate) fn file_path(u: &mut Unstructured<'_>) -> Result<PathBuf> {
    file_name(u).map(PathBuf::from)
}

/// `None`, `Some("")` for an automatic path, or `Some(file name)`.
pub(crate) fn json_target(u: &mut Unstructured<'_>) -> Result<Option<String>> {
    Ok(match u.int_in_range(0_u8..=2)? {
        0 => None,
        1 => Some(String::new()),
        _ => Some(file_name(u)?),
    })
}
