//! Task execution engine
//!
//! Runs the steps of a task one after another, stopping at the first step
//! that exits non-zero.

use crate::error::Result;
use crate::executor::CommandRunner;
use crate::task::{CommandSpec, TaskRegistry, ToolPrograms};
use std::path::Path;
use std::time::Duration;

/// Result of running a single step
#[derive(Debug, Clone)]
pub struct StepResult {
    /// The command that was spawned
    pub command: CommandSpec,
    /// Whether the command exited with code 0
    pub success: bool,
    /// Exit code from execution
    pub exit_code: i32,
    /// How long the command took
    pub duration: Duration,
    /// False if the process was killed by a signal
    pub completed: bool,
}

/// Result of running a task (which may include multiple steps)
#[derive(Debug)]
pub struct TaskResult {
    /// Name of the task
    pub name: String,
    /// Whether all steps succeeded
    pub success: bool,
    /// Exit code (0 if all succeeded, the failing step's code otherwise)
    pub exit_code: i32,
    /// Total duration for all steps
    pub duration: Duration,
    /// Results for the steps that ran
    pub step_results: Vec<StepResult>,
    /// Steps that never ran because an earlier one failed
    pub skipped: Vec<CommandSpec>,
}

impl TaskResult {
    /// Create a successful empty result
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            exit_code: 0,
            duration: Duration::ZERO,
            step_results: vec![],
            skipped: vec![],
        }
    }

    /// Add a step result
    pub fn add_result(&mut self, result: StepResult) {
        if !result.success && self.success {
            self.success = false;
            self.exit_code = result.exit_code;
        }
        self.duration += result.duration;
        self.step_results.push(result);
    }

    /// Get the number of successful steps
    pub fn success_count(&self) -> usize {
        self.step_results.iter().filter(|r| r.success).count()
    }

    /// Get the number of failed steps
    pub fn failed_count(&self) -> usize {
        self.step_results.iter().filter(|r| !r.success).count()
    }

    /// The step that decided the exit code, if any failed
    pub fn first_failure(&self) -> Option<&StepResult> {
        self.step_results.iter().find(|r| !r.success)
    }
}

/// Task execution context
pub struct TaskExecutor<'a, R: CommandRunner> {
    registry: &'a TaskRegistry,
    runner: R,
    programs: &'a ToolPrograms,
    /// Directory every step runs in
    working_dir: &'a Path,
}

impl<'a, R: CommandRunner> TaskExecutor<'a, R> {
    pub fn new(
        registry: &'a TaskRegistry,
        runner: R,
        programs: &'a ToolPrograms,
        working_dir: &'a Path,
    ) -> Self {
        Self {
            registry,
            runner,
            programs,
            working_dir,
        }
    }

    /// Resolve the commands a task would run, without running them
    pub fn plan(&self, task_name: &str) -> Result<Vec<CommandSpec>> {
        let task = self.registry.require(task_name)?;
        Ok(task.commands(self.programs))
    }

    /// Execute a task by name
    ///
    /// An unknown name fails before anything is spawned. A step that exits
    /// non-zero is not an error: it ends the task and its code is reported
    /// in the returned `TaskResult`.
    pub fn execute(&self, task_name: &str) -> Result<TaskResult> {
        let commands = self.plan(task_name)?;
        let mut result = TaskResult::empty(task_name);
        let mut pending = commands.into_iter();

        for command in pending.by_ref() {
            tracing::info!(task = task_name, command = %command, "running step");
            let run = self.runner.run(&command, self.working_dir)?;

            let step = StepResult {
                command,
                success: run.exit_code == 0,
                exit_code: run.exit_code,
                duration: run.duration,
                completed: run.completed,
            };
            let failed = !step.success;
            result.add_result(step);

            // Stop on first failure
            if failed {
                break;
            }
        }

        result.skipped = pending.collect();
        if !result.skipped.is_empty() {
            tracing::warn!(
                task = task_name,
                skipped = result.skipped.len(),
                "stopping after failed step"
            );
        }

        Ok(result)
    }
}
