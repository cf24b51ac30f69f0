use std::fs;
use std::path::{Path, PathBuf};

use crate::common::Error;

mod tmpdir;

pub(crate) use tmpdir::create_temporary_dir;

/// Copy `from` to `to` byte for byte, creating the parent directory of `to` when needed.
pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<(), Error> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(Error::at(parent))?;
    }
    fs::copy(from, to).map_err(Error::at(from))?;
    Ok(())
}

/// Copy `file` into `dir`, keeping its file name.
pub(crate) fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf, Error> {
    let name = file
        .file_name()
        .ok_or_else(|| Error::InvalidFileName(file.to_owned()))?;
    let destination = dir.join(name);
    copy_file(file, &destination)?;
    Ok(destination)
}

pub(crate) fn create_dir(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(Error::at(path))
}

/// All entries of `dir` matching the shell pattern `pattern`, in sorted order.
pub(crate) fn find_matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let full_pattern = format!(
        "{}/{pattern}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let mut matches = Vec::new();
    for entry in glob::glob(&full_pattern)? {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => {
                let path = e.path().to_owned();
                return Err(Error::Io(Some(path), e.into()));
            }
        }
    }
    matches.sort();
    Ok(matches)
}
