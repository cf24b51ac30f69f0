use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    BuildTopNotSet,
    DirectoryNotFound {
        what: &'static str,
        path: PathBuf,
    },
    TarballNotFound(PathBuf),
    AmbiguousTarball(PathBuf, Vec<PathBuf>),
    InvalidTarballName(PathBuf),
    InvalidFileName(PathBuf),
    CommandNotFound(String),
    CommandFailed {
        command: String,
        code: Option<i32>,
    },
    IcuDataFile {
        dir: PathBuf,
        found: usize,
    },
    Pattern(glob::PatternError),
    Io(Option<PathBuf>, io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BuildTopNotSet => {
                f.write_str("ANDROID_BUILD_TOP not set. Run source build/envsetup.sh")
            }
            Error::DirectoryNotFound { what, path } => {
                write!(f, "couldn't find {what} ({})", path.display())
            }
            Error::TarballNotFound(dir) => {
                write!(f, "no tzdata*.tar.gz file found in {}", dir.display())
            }
            Error::AmbiguousTarball(dir, candidates) => {
                write!(
                    f,
                    "expected one tzdata*.tar.gz file in {}, found {}:",
                    dir.display(),
                    candidates.len()
                )?;
                for candidate in candidates {
                    write!(f, " {}", candidate.display())?;
                }
                Ok(())
            }
            Error::InvalidTarballName(p) => {
                write!(f, "'{}': not a tzdata<version>.tar.gz file", p.display())
            }
            Error::InvalidFileName(p) => write!(f, "'{}': path has no file name", p.display()),
            Error::CommandNotFound(program) => write!(f, "'{program}': command not found"),
            Error::CommandFailed { command, code } => match code {
                Some(code) => write!(f, "command failed with exit status {code}: {command}"),
                None => write!(f, "command terminated by a signal: {command}"),
            },
            Error::IcuDataFile { dir, found } => write!(
                f,
                "expected exactly one ICU .dat file in {}, found {found}",
                dir.display()
            ),
            Error::Pattern(e) => write!(f, "invalid file pattern: {e}"),
            Error::Io(location, e) => {
                if let Some(path) = location {
                    write!(f, "'{}': {e}", path.display())
                } else {
                    write!(f, "IO error: {e}")
                }
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(None, err)
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Pattern(err)
    }
}

impl Error {
    /// Attach the path an IO operation failed on.
    pub fn at(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |err| Error::Io(Some(path), err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::{io, path::PathBuf};

    #[test]
    fn io_errors_name_their_path() {
        let err = Error::at("/tmp/tzlookup.xml")(io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("'/tmp/tzlookup.xml': "));
    }

    #[test]
    fn ambiguous_tarball_lists_candidates() {
        let err = Error::AmbiguousTarball(
            PathBuf::from("/iana"),
            vec!["/iana/tzdata2024b.tar.gz".into(), "/iana/tzdata2025a.tar.gz".into()],
        );
        assert_eq!(
            err.to_string(),
            "expected one tzdata*.tar.gz file in /iana, found 2: /iana/tzdata2024b.tar.gz /iana/tzdata2025a.tar.gz"
        );
    }

    #[test]
    fn failed_command_reports_status() {
        let err = Error::CommandFailed {
            command: "zic -d /tmp/data".to_string(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "command failed with exit status 2: zic -d /tmp/data"
        );
    }
}
