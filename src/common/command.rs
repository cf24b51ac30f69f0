use std::{
    ffi::{OsStr, OsString},
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::log::{dev_debug, user_error};

use super::Error;

/// A program invocation handed to a [`CommandRunner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalCommand {
    pub(crate) program: OsString,
    pub(crate) arguments: Vec<OsString>,
    pub(crate) current_dir: Option<PathBuf>,
    pub(crate) env: Vec<(OsString, OsString)>,
}

impl ExternalCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            arguments: Vec::new(),
            current_dir: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.arguments.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.arguments
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_owned());
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }
}

impl Display for ExternalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key.to_string_lossy(), value.to_string_lossy())?;
        }
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.arguments {
            write!(f, " {}", arg.to_string_lossy().escape_default())?;
        }
        if let Some(dir) = &self.current_dir {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    #[cfg(test)]
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs on behalf of the update steps.
pub trait CommandRunner {
    fn run(&mut self, command: &ExternalCommand) -> Result<CommandOutput, Error>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default)]
pub struct SystemRunner {
    capture: bool,
}

impl SystemRunner {
    /// Children share our stdout and stderr, so tool progress shows up on the console.
    pub fn inherit() -> Self {
        Self { capture: false }
    }

    #[cfg(test)]
    pub fn capturing() -> Self {
        Self { capture: true }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ExternalCommand) -> Result<CommandOutput, Error> {
        let mut process = Command::new(&command.program);
        process.args(&command.arguments);
        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }
        process.envs(command.env.iter().map(|(k, v)| (k, v)));

        let spawn_error = |err: io::Error| match err.kind() {
            io::ErrorKind::NotFound => {
                Error::CommandNotFound(command.program.to_string_lossy().into_owned())
            }
            _ => Error::Io(Some(PathBuf::from(&command.program)), err),
        };

        if self.capture {
            let output = process
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_error)?;
            Ok(CommandOutput {
                code: output.status.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            })
        } else {
            let status = process.status().map_err(spawn_error)?;
            Ok(CommandOutput {
                code: status.code(),
                ..Default::default()
            })
        }
    }
}

/// Run `command` and treat anything but a zero exit status as fatal.
pub fn run_checked<R: CommandRunner + ?Sized>(
    runner: &mut R,
    command: &ExternalCommand,
) -> Result<CommandOutput, Error> {
    dev_debug!("running {command}");
    let output = runner.run(command)?;
    if output.success() {
        if !output.stdout.is_empty() {
            dev_debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
        }
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        user_error!("{}", stderr.trim_end());
    }

    Err(Error::CommandFailed {
        command: command.to_string(),
        code: output.code,
    })
}
