pub mod runner;

use crate::error::Result;
use crate::task::CommandSpec;
use runner::{run_command, RunOptions, RunResult};
use std::path::Path;

/// Something that can run a resolved command and report how it exited.
///
/// The task executor only talks to this trait, so tests can record
/// invocations instead of spawning processes.
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> Result<RunResult>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner {
    stdout_to_stderr: bool,
}

impl ProcessRunner {
    /// Children share all three standard streams
    pub fn new() -> Self {
        Self::default()
    }

    /// Children write their stdout to our stderr, so our own stdout can
    /// carry a single JSON document
    pub fn with_stdout_to_stderr() -> Self {
        Self {
            stdout_to_stderr: true,
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> Result<RunResult> {
        let mut options = RunOptions::new().with_working_dir(working_dir);
        if self.stdout_to_stderr {
            options = options.with_stdout_to_stderr();
        }
        run_command(command, options)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> Result<RunResult> {
        (**self).run(command, working_dir)
    }
}
