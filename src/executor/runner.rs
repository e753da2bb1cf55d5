//! External tool subprocess management
//!
//! This module handles:
//! - Spawning the tool with inherited stdin/stdout/stderr
//! - Optionally folding the tool's stdout into stderr (machine-readable output)
//! - Waiting for completion (no timeout)
//! - Collecting exit codes, including signal deaths

use crate::error::{Error, Result};
use crate::task::CommandSpec;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Result of running one external command
#[derive(Debug)]
pub struct RunResult {
    /// The exit code from the process
    pub exit_code: i32,
    /// How long the command took to run
    pub duration: Duration,
    /// Whether the process exited on its own (not killed by a signal)
    pub completed: bool,
}

/// Options for running an external command
#[derive(Debug, Default)]
pub struct RunOptions<'a> {
    /// Working directory; the invoking directory when unset
    pub working_dir: Option<&'a Path>,
    /// Send the child's stdout to our stderr, keeping our stdout clean
    pub stdout_to_stderr: bool,
}

impl<'a> RunOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: &'a Path) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }
}

/// Run an external command to completion.
///
/// Output is neither captured nor transformed: the child shares this
/// process's standard streams. With `stdout_to_stderr` the child's stdout
/// is attached to our stderr instead.
///
/// # Example
///
/// ```no_run
/// use tannhauser_tasks::executor::runner::{run_command, RunOptions};
/// use tannhauser_tasks::task::CommandSpec;
///
/// let cmd = CommandSpec::new("mypy", vec!["src/tannhauser".to_string()]);
/// let result = run_command(&cmd, RunOptions::new())?;
/// println!("Exit code: {}", result.exit_code);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run_command(command: &CommandSpec, options: RunOptions) -> Result<RunResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);
    cmd.stdin(Stdio::inherit());
    if options.stdout_to_stderr {
        cmd.stdout(Stdio::from(std::io::stderr()));
    } else {
        cmd.stdout(Stdio::inherit());
    }
    cmd.stderr(Stdio::inherit());

    if let Some(dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| Error::Launch {
        program: command.program.clone(),
        source,
    })?;

    tracing::debug!(pid = child.id(), command = %command, "spawned");

    let exit_status = child.wait()?;
    let duration = start.elapsed();
    let exit_code = exit_code_from_status(&exit_status);

    tracing::debug!(exit_code, elapsed_ms = duration.as_millis() as u64, "exited");

    Ok(RunResult {
        exit_code,
        duration,
        completed: exit_status.code().is_some(),
    })
}

/// Extract exit code from ExitStatus
///
/// On Unix, handles both normal exits and signals:
/// - Normal exit: return code
/// - Signal: 128 + signal number
pub fn exit_code_from_status(status: &ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(signal) = status.signal() {
            128 + signal
        } else {
            -1
        }
    }

    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}
