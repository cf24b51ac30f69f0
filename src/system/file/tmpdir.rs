use std::ffi::OsString;
use std::io;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::PathBuf;

/// Create a fresh directory named `<prefix>-XXXXXX` in the system temporary directory.
pub(crate) fn create_temporary_dir(prefix: &str) -> io::Result<PathBuf> {
    let template = std::env::temp_dir().join(format!("{prefix}-XXXXXX"));
    let mut template = template.as_os_str().as_bytes().to_vec();
    if template.contains(&0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "temporary directory path contains a null byte",
        ));
    }
    template.push(0);

    // SAFETY: mkdtemp is passed a valid null-terminated C string that it may modify in place
    let ptr = unsafe { libc::mkdtemp(template.as_mut_ptr().cast()) };

    if ptr.is_null() {
        return Err(io::Error::last_os_error());
    }

    template.pop();
    Ok(OsString::from_vec(template).into())
}
