use std::ffi::OsString;
use std::path::PathBuf;

/// Render a parsed CLI value back into the arguments that produce it.
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}

/// Something that can be shown as a full command line.
pub trait Invocable {
    fn path_to_exe(&self) -> PathBuf;
    fn args(&self) -> Vec<OsString>;
}
